use crate::layout::wrap::Delimiters;

/// One input line of the report: sequence number, date and full name.
///
/// The fields are opaque text. Nothing here parses numbers or dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub number: String,
    pub date: String,
    pub fio: String,
}

impl Record {
    pub fn new(
        number: impl Into<String>,
        date: impl Into<String>,
        fio: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            date: date.into(),
            fio: fio.into(),
        }
    }

    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Number => &self.number,
            Column::Date => &self.date,
            Column::Fio => &self.fio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Number,
    Date,
    Fio,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Number, Column::Date, Column::Fio];

    /// Header caption, also the column title used in settings files.
    pub fn caption(self) -> &'static str {
        match self {
            Column::Number => "Номер",
            Column::Date => "Дата",
            Column::Fio => "ФИО",
        }
    }

    pub fn from_title(title: &str) -> Option<Column> {
        Column::ALL
            .into_iter()
            .find(|column| column.caption() == title.trim())
    }

    /// Name used in diagnostics and configuration keys.
    pub fn key(self) -> &'static str {
        match self {
            Column::Number => "number",
            Column::Date => "date",
            Column::Fio => "fio",
        }
    }

    /// Soft break points for a value of this column.
    pub fn delimiters_for(self, value: &str) -> Delimiters {
        match self {
            Column::Number => Delimiters::None,
            Column::Fio => Delimiters::Whitespace,
            Column::Date => {
                if value.contains('/') {
                    Delimiters::Char('/')
                } else if value.contains('.') {
                    Delimiters::Char('.')
                } else {
                    Delimiters::None
                }
            }
        }
    }
}
