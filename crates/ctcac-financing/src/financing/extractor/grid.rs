//! In-memory worksheet view used by the extraction heuristics.
//!
//! Rows and columns are 1-based, matching the A1 addressing people use when
//! describing application layouts ("column B", "column AG").

use calamine::{Data, Range};

pub const COLUMN_A: u32 = 1;
pub const COLUMN_B: u32 = 2;
pub const COLUMN_D: u32 = 4;
pub const COLUMN_G: u32 = 7;
pub const COLUMN_L: u32 = 12;
pub const COLUMN_AG: u32 = 33;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Whether a label search may consider this cell at all. Blank text,
    /// zero and `false` never act as labels.
    fn is_searchable(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Number(value) => *value != 0.0,
            CellValue::Text(text) => !text.is_empty(),
            CellValue::Bool(flag) => *flag,
        }
    }

    /// Cell content rendered as text; empty cells yield an empty string.
    pub fn text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(value) => format_number(*value),
            CellValue::Text(text) => text.clone(),
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
        }
    }

    /// Numeric reading of the cell. Never fails: unreadable content is zero.
    ///
    /// Text is reduced to its digits, `.` and `-` before parsing, so
    /// `"$1,234.56"` reads as `1234.56` and `"N/A"` as `0.0`.
    pub fn number(&self) -> f64 {
        match self {
            CellValue::Empty => 0.0,
            CellValue::Number(value) => *value,
            CellValue::Bool(flag) => f64::from(u8::from(*flag)),
            CellValue::Text(text) => {
                let cleaned: String = text
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                cleaned.parse::<f64>().unwrap_or(0.0)
            }
        }
    }
}

impl From<&Data> for CellValue {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => CellValue::Empty,
            Data::Int(int) => CellValue::Number(*int as f64),
            Data::Float(float) => CellValue::Number(*float),
            Data::String(text) => CellValue::Text(text.clone()),
            Data::Bool(flag) => CellValue::Bool(*flag),
            Data::DateTime(datetime) => CellValue::Number(datetime.as_f64()),
            Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
            Data::Error(err) => CellValue::Text(err.to_string()),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Contains,
    Exact,
}

/// A worksheet's used area, addressed from A1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Materialises a calamine range, shifting it so that row 1 / column 1 is A1
    /// regardless of where the sheet's used area starts.
    pub fn from_range(range: &Range<Data>) -> Self {
        let Some((start_row, start_col)) = range.start() else {
            return Self::default();
        };

        let mut grid = Self::default();
        for (row, col, value) in range.cells() {
            if matches!(value, Data::Empty) {
                continue;
            }
            let abs_row = start_row + row as u32 + 1;
            let abs_col = start_col + col as u32 + 1;
            grid.set(abs_row, abs_col, CellValue::from(value));
        }
        grid
    }

    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        if row == 0 || col == 0 {
            return;
        }
        let (r, c) = ((row - 1) as usize, (col - 1) as usize);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let cells = &mut self.rows[r];
        if cells.len() <= c {
            cells.resize_with(c + 1, CellValue::default);
        }
        cells[c] = value;
    }

    pub fn cell(&self, row: u32, col: u32) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        if row == 0 || col == 0 {
            return &EMPTY;
        }
        self.rows
            .get((row - 1) as usize)
            .and_then(|cells| cells.get((col - 1) as usize))
            .unwrap_or(&EMPTY)
    }

    /// Last populated row, or 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn number_at(&self, row: u32, col: u32) -> f64 {
        self.cell(row, col).number()
    }

    /// Trimmed text of a cell.
    pub fn text_at(&self, row: u32, col: u32) -> String {
        self.cell(row, col).text().trim().to_string()
    }

    /// Scans every cell row by row and returns the first `(row, col)` whose
    /// text matches `needle`, ignoring case.
    pub fn find_label(&self, needle: &str, mode: MatchMode) -> Option<(u32, u32)> {
        let needle = needle.to_lowercase();
        for (r, cells) in self.rows.iter().enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                if !cell.is_searchable() {
                    continue;
                }
                let text = cell.text().to_lowercase();
                let hit = match mode {
                    MatchMode::Contains => text.contains(&needle),
                    MatchMode::Exact => text == needle,
                };
                if hit {
                    return Some((r as u32 + 1, c as u32 + 1));
                }
            }
        }
        None
    }
}
