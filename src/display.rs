//! Shared prettytable formatting for machine state dumps.

use prettytable::{format as TableFormat, Table};

use crate::word::Word;

lazy_static! {
  pub(crate) static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

/// One-column table of words rendered as "decimal binary".
pub(crate) fn word_table<I>(values: I) -> Table
  where I: Iterator<Item = Word>
{
  let mut table = Table::new();
  table.set_format(*TABLE_DISPLAY_FORMAT);
  for value in values {
    table.add_row(row![value.dec_bin()]);
  }
  table
}
