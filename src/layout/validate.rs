use crate::config::{ConfigError, FioWidthPolicy, RawSettings};
use crate::model::Column;

/// Border characters per physical line: `"| "`, two `" | "` and `" |"`.
pub const SEPARATOR_OVERHEAD: usize = 10;

/// Rule, caption row, rule.
pub const MIN_PAGE_HEIGHT: usize = 3;

/// Validated page and column geometry. Only [`validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    page_width: usize,
    page_height: usize,
    number_width: usize,
    date_width: usize,
    fio_width: usize,
}

impl LayoutConfig {
    /// Validates explicit widths, keeping `fio_width` unless it is 0.
    pub fn try_new(
        page_width: usize,
        page_height: usize,
        number_width: usize,
        date_width: usize,
        fio_width: usize,
    ) -> Result<Self, ConfigError> {
        validate(&RawSettings {
            page_width: Some(page_width),
            page_height: Some(page_height),
            number_width: Some(number_width),
            date_width: Some(date_width),
            fio_width: Some(fio_width),
            fio_width_policy: FioWidthPolicy::Declared,
        })
    }

    pub fn page_width(&self) -> usize {
        self.page_width
    }

    pub fn page_height(&self) -> usize {
        self.page_height
    }

    pub fn number_width(&self) -> usize {
        self.number_width
    }

    pub fn date_width(&self) -> usize {
        self.date_width
    }

    pub fn fio_width(&self) -> usize {
        self.fio_width
    }

    pub fn width(&self, column: Column) -> usize {
        match column {
            Column::Number => self.number_width,
            Column::Date => self.date_width,
            Column::Fio => self.fio_width,
        }
    }

    /// Characters in one physical line, borders included.
    pub fn line_width(&self) -> usize {
        self.number_width + self.date_width + self.fio_width + SEPARATOR_OVERHEAD
    }
}

/// Checks raw settings and resolves the fio column width.
///
/// The width check runs before the height check. With
/// [`FioWidthPolicy::Fill`], or when no fio width was declared, the fio
/// column takes the space the page leaves after the other two columns.
pub fn validate(raw: &RawSettings) -> Result<LayoutConfig, ConfigError> {
    let page_width = raw.page_width.ok_or(ConfigError::MissingSetting("width"))?;
    let page_height = raw
        .page_height
        .ok_or(ConfigError::MissingSetting("height"))?;
    let number_width = raw
        .number_width
        .ok_or(ConfigError::MissingSetting("number column width"))?;
    let date_width = raw
        .date_width
        .ok_or(ConfigError::MissingSetting("date column width"))?;
    let declared_fio = raw.fio_width.unwrap_or(0);

    let required = [number_width, date_width, declared_fio]
        .into_iter()
        .try_fold(SEPARATOR_OVERHEAD, usize::checked_add);
    if !required.is_some_and(|required| required <= page_width) {
        return Err(ConfigError::WidthOverflow {
            required: required.unwrap_or(usize::MAX),
            page_width,
        });
    }

    if page_height < MIN_PAGE_HEIGHT {
        return Err(ConfigError::PageTooShort {
            height: page_height,
            minimum: MIN_PAGE_HEIGHT,
        });
    }

    // The overflow check above guarantees the subtraction cannot underflow.
    let fio_width = match raw.fio_width_policy {
        FioWidthPolicy::Declared if declared_fio > 0 => declared_fio,
        _ => page_width - SEPARATOR_OVERHEAD - number_width - date_width,
    };

    let config = LayoutConfig {
        page_width,
        page_height,
        number_width,
        date_width,
        fio_width,
    };
    if let Some(column) = Column::ALL
        .into_iter()
        .find(|&column| config.width(column) == 0)
    {
        return Err(ConfigError::ZeroWidth(column.key()));
    }

    Ok(config)
}
