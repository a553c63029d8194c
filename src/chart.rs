// Categorical bar chart drawn with block characters
use serde_json::Value;

const PARTIAL_BLOCKS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];
const FULL_BLOCK: char = '█';
const NEGATIVE_BLOCK: char = '░';
const MAX_LABEL_WIDTH: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    pub bars: Vec<Bar>,
}

/// One bar per row, in row order: label from `x_field`, height from `y_field`.
///
/// Returns `None` for an empty table or when any row lacks a usable label or
/// numeric value; a half-drawn chart would misstate the invoice.
pub fn bar_chart(rows: &[Value], x_field: &str, y_field: &str, title: &str) -> Option<BarChart> {
    if rows.is_empty() {
        return None;
    }

    let bars = rows
        .iter()
        .map(|row| {
            let label = match row.get(x_field)? {
                Value::String(s) => s.clone(),
                v @ (Value::Number(_) | Value::Bool(_)) => v.to_string(),
                _ => return None,
            };
            let value = row.get(y_field)?.as_f64()?;
            Some(Bar { label, value })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(BarChart {
        title: title.to_string(),
        x_field: x_field.to_string(),
        y_field: y_field.to_string(),
        bars,
    })
}

pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn bar_glyphs(magnitude: f64, max: f64, cells: usize, negative: bool) -> String {
    if max <= 0.0 || cells == 0 {
        return String::new();
    }
    let eighths = ((magnitude / max) * (cells * 8) as f64).round() as usize;
    let (full, rem) = (eighths / 8, eighths % 8);

    if negative {
        // No partial glyphs for the shaded block
        let n = (full + usize::from(rem >= 4)).max(usize::from(magnitude > 0.0));
        return NEGATIVE_BLOCK.to_string().repeat(n.min(cells));
    }

    let mut bar = FULL_BLOCK.to_string().repeat(full);
    if rem > 0 {
        bar.push(PARTIAL_BLOCKS[rem]);
    } else if full == 0 && magnitude > 0.0 {
        // Keep tiny positive values visible
        bar.push(PARTIAL_BLOCKS[1]);
    }
    bar
}

impl BarChart {
    /// Rows of `label │bar value`, each at most `width` chars wide.
    pub fn render_lines(&self, width: usize) -> Vec<String> {
        let values: Vec<String> = self.bars.iter().map(|b| format_value(b.value)).collect();
        let value_width = values.iter().map(|v| v.chars().count()).max().unwrap_or(0);

        let longest_label = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .chain(std::iter::once(self.x_field.chars().count()))
            .max()
            .unwrap_or(0);
        let label_width = longest_label.min(MAX_LABEL_WIDTH).min(width / 3).max(1);

        let bar_cells = width.saturating_sub(label_width + value_width + 3).max(1);
        let max = self
            .bars
            .iter()
            .map(|b| b.value.abs())
            .fold(0.0_f64, f64::max);

        let mut lines = Vec::with_capacity(self.bars.len() + 1);
        lines.push(format!(
            "{:<lw$} │ {}",
            truncate(&self.x_field, label_width),
            self.y_field,
            lw = label_width
        ));

        for (bar, value) in self.bars.iter().zip(&values) {
            let glyphs = bar_glyphs(bar.value.abs(), max, bar_cells, bar.value < 0.0);
            let pad = bar_cells.saturating_sub(glyphs.chars().count());
            lines.push(format!(
                "{:<lw$} │{}{} {:>vw$}",
                truncate(&bar.label, label_width),
                glyphs,
                " ".repeat(pad),
                value,
                lw = label_width,
                vw = value_width
            ));
        }
        lines
    }
}
