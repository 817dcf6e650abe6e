//! Plain-text dump of full policy records

use crate::config::OutputMode;
use crate::state::PolicyRecord;

/// Formats one labelled block per record, each closed by a rule line
///
/// Multi-site blocks are numbered and name the website; single-site blocks
/// use a shorter rule and no website line.
pub fn format_text_dump(records: &[PolicyRecord], mode: OutputMode) -> String {
    let mut out = String::new();

    for (index, record) in records.iter().enumerate() {
        match mode {
            OutputMode::MultiSite => {
                out.push_str(&format!("【第{}条】{}\n", index + 1, record.title));
            }
            OutputMode::SingleSite => {
                out.push_str(&format!("【标题】{}\n", record.title));
            }
        }
        out.push_str(&format!("【链接】{}\n", record.url));
        out.push_str(&format!("【日期】{}\n", record.publication_date));
        out.push_str(&format!("【来源】{}\n", record.source));
        if mode == OutputMode::MultiSite {
            out.push_str(&format!("【网站】{}\n", record.website));
        }
        out.push_str(&format!("【内容】\n{}\n", record.content));
        out.push_str(&rule(mode));
        out.push_str("\n\n");
    }

    out
}

fn rule(mode: OutputMode) -> String {
    let width = match mode {
        OutputMode::MultiSite => 100,
        OutputMode::SingleSite => 80,
    };
    "=".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LinkCandidate;

    fn record(n: usize) -> PolicyRecord {
        PolicyRecord::new(
            LinkCandidate {
                title: format!("第{}号公告全文发布", n),
                url: format!("https://www.nhc.gov.cn/{}.shtml", n),
            },
            "https://www.nhc.gov.cn/list.shtml",
            "2024-01-01".to_string(),
            "国家卫健委".to_string(),
            "第一条\n第二条".to_string(),
        )
    }

    #[test]
    fn test_multi_site_blocks() {
        let dump = format_text_dump(&[record(1), record(2)], OutputMode::MultiSite);

        assert!(dump.starts_with("【第1条】第1号公告全文发布\n【链接】https://www.nhc.gov.cn/1.shtml\n"));
        assert!(dump.contains("【第2条】第2号公告全文发布\n"));
        assert!(dump.contains("【网站】https://www.nhc.gov.cn/list.shtml\n"));
        assert!(dump.contains("【内容】\n第一条\n第二条\n"));
        assert_eq!(dump.matches(&"=".repeat(100)).count(), 2);
    }

    #[test]
    fn test_single_site_blocks() {
        let dump = format_text_dump(&[record(1)], OutputMode::SingleSite);

        assert!(dump.starts_with("【标题】第1号公告全文发布\n"));
        assert!(!dump.contains("【网站】"));
        assert!(dump.ends_with(&format!("{}\n\n", "=".repeat(80))));
        assert!(!dump.contains(&"=".repeat(81)));
    }
}
