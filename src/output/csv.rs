//! CSV summary of policy records
//!
//! One row per record without the body text. Fields are quoted only when they
//! contain a comma, a quote or a line break.

use crate::config::OutputMode;
use crate::state::PolicyRecord;

/// Byte order mark so spreadsheet tools detect UTF-8
const UTF8_BOM: char = '\u{feff}';

const LINE_END: &str = "\r\n";

/// Longest title written in the multi-site summary, in characters
const MAX_TITLE_CHARS: usize = 100;

/// Formats the CSV summary, BOM and header row included
///
/// The multi-site layout has a website column and truncates long titles; the
/// single-site layout has neither.
pub fn format_summary_csv(records: &[PolicyRecord], mode: OutputMode) -> String {
    let mut csv = String::new();
    csv.push(UTF8_BOM);

    let header: &[&str] = match mode {
        OutputMode::MultiSite => &["标题", "链接", "发布日期", "来源", "网站", "内容长度", "爬取时间"],
        OutputMode::SingleSite => &["标题", "链接", "发布日期", "来源", "内容长度", "爬取时间"],
    };
    push_row(&mut csv, header.iter().copied());

    for record in records {
        let content_length = record.content_length.to_string();
        match mode {
            OutputMode::MultiSite => {
                let title = truncate_title(&record.title);
                push_row(
                    &mut csv,
                    [
                        title.as_str(),
                        record.url.as_str(),
                        record.publication_date.as_str(),
                        record.source.as_str(),
                        record.website.as_str(),
                        content_length.as_str(),
                        record.crawl_time.as_str(),
                    ],
                );
            }
            OutputMode::SingleSite => push_row(
                &mut csv,
                [
                    record.title.as_str(),
                    record.url.as_str(),
                    record.publication_date.as_str(),
                    record.source.as_str(),
                    content_length.as_str(),
                    record.crawl_time.as_str(),
                ],
            ),
        }
    }

    csv
}

/// Truncates a title to 100 characters followed by `...`
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

fn push_row<'a>(csv: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let row: Vec<String> = fields.into_iter().map(escape_field).collect();
    csv.push_str(&row.join(","));
    csv.push_str(LINE_END);
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
