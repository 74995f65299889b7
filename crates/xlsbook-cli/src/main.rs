//! xlsbook command-line tool

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use xlsbook::prelude::*;
use xlsbook::Sheet;

#[derive(Parser)]
#[command(name = "xlsbook")]
#[command(author, version, about = "Inspect and write .xls workbooks", long_about = None)]
struct Cli {
    /// Log what the reader and the caches do
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sheets and record table usage of a workbook
    Info {
        /// Input file
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the cell values of a sheet as tab-separated text
    Dump {
        /// Input file
        input: PathBuf,

        /// Sheet index (0-based)
        #[arg(short, long, default_value = "0")]
        sheet: usize,
    },

    /// Write a small formatted sample workbook
    Demo {
        /// Output file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { input, json } => show_info(&input, json),
        Commands::Dump { input, sheet } => dump_sheet(&input, sheet),
        Commands::Demo { output } => write_demo(&output),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, Serialize)]
struct InfoReport {
    file: String,
    date_1904: bool,
    fonts: Usage,
    styles: Usage,
    custom_formats: Usage,
    sheets: Vec<SheetReport>,
}

#[derive(Debug, Serialize)]
struct Usage {
    used: usize,
    limit: usize,
}

#[derive(Debug, Serialize)]
struct SheetReport {
    name: String,
    cells: usize,
    used_range: Option<String>,
    outline_level: u8,
}

impl InfoReport {
    fn new(file: &Path, doc: &Document) -> Self {
        let settings = doc.settings();
        let limits = &settings.limits;
        Self {
            file: file.display().to_string(),
            date_1904: settings.date_1904,
            fonts: Usage {
                used: doc.font_count(),
                limit: limits.max_fonts,
            },
            styles: Usage {
                used: doc.style_count(),
                limit: limits.max_styles,
            },
            custom_formats: Usage {
                used: doc.custom_formats().len(),
                limit: limits.max_custom_formats,
            },
            sheets: doc.sheets().iter().map(SheetReport::new).collect(),
        }
    }
}

impl SheetReport {
    fn new(sheet: &Sheet) -> Self {
        Self {
            name: sheet.name().to_string(),
            cells: sheet.cell_count(),
            used_range: sheet.used_range().map(|(r0, c0, r1, c1)| {
                format!("{}:{}", cell_reference(r0, c0), cell_reference(r1, c1))
            }),
            outline_level: sheet
                .rows()
                .map(|(_, row)| row.outline_level)
                .max()
                .unwrap_or(0),
        }
    }
}

fn show_info(input: &Path, json: bool) -> Result<()> {
    let doc = Document::open(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    let report = InfoReport::new(input, &doc);

    if json {
        let text = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", text);
        return Ok(());
    }

    println!("File: {}", report.file);
    println!(
        "Date system: {}",
        if report.date_1904 { "1904" } else { "1900" }
    );
    println!("Fonts: {} / {}", report.fonts.used, report.fonts.limit);
    println!("Styles: {} / {}", report.styles.used, report.styles.limit);
    println!(
        "Custom formats: {} / {}",
        report.custom_formats.used, report.custom_formats.limit
    );
    println!("Sheets: {}", report.sheets.len());
    for (i, sheet) in report.sheets.iter().enumerate() {
        println!("  [{}] {}", i, sheet.name);
        match &sheet.used_range {
            Some(range) => println!("      Used range: {} ({} cells)", range, sheet.cells),
            None => println!("      Used range: (empty)"),
        }
        if sheet.outline_level > 0 {
            println!("      Outline levels: {}", sheet.outline_level);
        }
    }

    Ok(())
}

fn dump_sheet(input: &Path, index: usize) -> Result<()> {
    let doc = Document::open(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    let sheet = doc.sheet(index).with_context(|| {
        format!(
            "Sheet {} not found ('{}' has {} sheets)",
            index,
            input.display(),
            doc.sheet_count()
        )
    })?;

    for line in sheet_lines(sheet) {
        println!("{}", line);
    }
    Ok(())
}

/// Tab-separated lines covering the used range of `sheet`
fn sheet_lines(sheet: &Sheet) -> Vec<String> {
    let Some((first_row, first_col, last_row, last_col)) = sheet.used_range() else {
        return Vec::new();
    };

    (first_row..=last_row)
        .map(|row| {
            (first_col..=last_col)
                .map(|col| match sheet.value(row, col) {
                    Some(CellValue::Blank) | None => String::new(),
                    Some(value) => value.to_string().replace(['\t', '\n', '\r'], " "),
                })
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect()
}

fn write_demo(output: &Path) -> Result<()> {
    let header = CellStyle::new()
        .with_bold(true)
        .with_font_color(Color::WHITE)
        .with_background(Color::BLUE)
        .with_alignment(CellAlignment::Center)
        .with_outline(BorderType::Thin);
    let money = CellStyle::with_format("#,##0.00");
    let total = money
        .clone()
        .with_bold(true)
        .with_border_top(true)
        .with_border_type(BorderType::Double);

    let mut wb = ExcelWorkbook::create(output)
        .with_context(|| format!("Failed to create '{}'", output.display()))?;

    for (col, title) in [(1, "Item"), (2, "Amount"), (3, "Share")] {
        wb.write_text(col, title)?;
        wb.apply_formatting(col, &header)?;
    }

    let items = [("Rent", 1200.0), ("Power", 180.5), ("Travel", 419.5)];
    let sum: f64 = items.iter().map(|(_, amount)| amount).sum();
    for (name, amount) in items {
        wb.next_row()?;
        wb.write_text(1, name)?;
        wb.write_number(2, amount)?;
        wb.apply_formatting(2, &money)?;
        wb.write_percentage(3, amount / sum * 100.0)?;
    }
    wb.group_rows(2, 1 + items.len() as u32)?;

    wb.next_row()?;
    wb.write_text(1, "Total")?;
    wb.apply_formatting(1, &CellStyle::new().with_bold(true))?;
    wb.write_number(2, sum)?;
    wb.apply_formatting(2, &total)?;

    wb.save()
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    let doc = wb.session().document();
    println!(
        "Wrote {} ({} styles, {} fonts)",
        output.display(),
        doc.style_count(),
        doc.font_count()
    );
    Ok(())
}

/// A1-style reference for a 0-based cell position
fn cell_reference(row: u32, col: u16) -> String {
    let mut letters = Vec::new();
    let mut n = u32::from(col) + 1;
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect::<String>() + &(row + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference(0, 0), "A1");
        assert_eq!(cell_reference(9, 25), "Z10");
        assert_eq!(cell_reference(0, 26), "AA1");
        assert_eq!(cell_reference(65535, 255), "IV65536");
    }

    #[test]
    fn test_sheet_lines() {
        let mut doc = Document::new();
        let idx = doc.create_sheet("Data").unwrap();
        let sheet = doc.sheet_mut(idx).unwrap();
        sheet.set_value(1, 1, "a\tb").unwrap();
        sheet.set_value(1, 3, 7.0).unwrap();
        sheet.set_value(2, 2, true).unwrap();

        let lines = sheet_lines(doc.sheet(idx).unwrap());
        assert_eq!(lines, vec!["a b\t\t7", "\tTRUE\t"]);
    }

    #[test]
    fn test_info_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.xls");
        write_demo(&path).unwrap();

        let doc = Document::open(&path).unwrap();
        let report = InfoReport::new(&path, &doc);
        assert_eq!(report.sheets.len(), 1);
        assert_eq!(report.sheets[0].name, "Sheet1");
        assert_eq!(report.sheets[0].used_range.as_deref(), Some("A1:C5"));
        assert_eq!(report.sheets[0].outline_level, 1);
        assert_eq!(report.custom_formats.used, 0);
        assert!(report.styles.used <= report.styles.limit);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["fonts"]["limit"], serde_json::json!(report.fonts.limit));
    }
}
