// src/report/tier.rs
// Read-time report views for the free and pro tiers

use crate::session::ReportTier;

/// Shown in place of the rest of the top recommendation on the free tier
pub const LOCK_NOTICE: &str =
    "*🔒 Full details, implementation approach, and budget estimates are available in the Pro Report.*";

/// Replaces the "Next Steps" heading on the free tier
pub const UPSELL_BLOCK: &[&str] = &[
    "",
    "---",
    "",
    "## 🚀 Unlock Your Complete Implementation Plan",
    "",
    "Upgrade to the **Pro Report** to unlock:",
    "- ✅ Full details for all 3 priority projects",
    "- ✅ Detailed business impact analysis",
    "- ✅ Step-by-step implementation approach",
    "- ✅ Budget estimates for each project",
    "- ✅ PDF export for sharing with stakeholders",
    "- ✅ Priority consultation scheduling",
    "",
];

const TOP_PRIORITY: &str = "**1. Top Priority";
const SECONDARY_PRIORITY: &str = "**2. Secondary Priority";
const EXPLORATORY_PRIORITY: &str = "**3. Exploratory Priority";
const NEXT_STEPS: &str = "**Next Steps";

/// Lines of the top recommendation visible after its heading
const TOP_PRIORITY_PREVIEW_LINES: usize = 3;

/// Produces the view of a stored report that a tier is allowed to see.
/// The stored text is never modified.
pub trait TierFilter: Send + Sync {
    fn render(&self, report: &str, tier: ReportTier) -> String;
}

/// Line-oriented filter keyed on the recommendation headings
#[derive(Debug, Default, Clone)]
pub struct MarkdownTierFilter;

impl MarkdownTierFilter {
    pub fn new() -> Self {
        Self
    }

    fn free_view(report: &str) -> String {
        let mut out: Vec<&str> = Vec::new();
        let mut in_top_priority = false;
        let mut top_priority_lines = 0;
        let mut skipping = false;
        let mut upsell_emitted = false;

        for line in report.split('\n') {
            if line.contains(TOP_PRIORITY) {
                in_top_priority = true;
                out.push(line);
                continue;
            }

            if in_top_priority {
                top_priority_lines += 1;
                if top_priority_lines <= TOP_PRIORITY_PREVIEW_LINES {
                    out.push(line);
                } else {
                    out.push("");
                    out.push(LOCK_NOTICE);
                    in_top_priority = false;
                    skipping = true;
                }
                continue;
            }

            if line.contains(SECONDARY_PRIORITY) || line.contains(EXPLORATORY_PRIORITY) {
                skipping = true;
                continue;
            }

            if line.contains(NEXT_STEPS) {
                skipping = false;
                if !upsell_emitted {
                    out.extend_from_slice(UPSELL_BLOCK);
                    upsell_emitted = true;
                }
                continue;
            }

            if !skipping {
                out.push(line);
            }
        }

        out.join("\n")
    }
}

impl TierFilter for MarkdownTierFilter {
    fn render(&self, report: &str, tier: ReportTier) -> String {
        match tier {
            ReportTier::Free => Self::free_view(report),
            ReportTier::Pro => report.to_string(),
        }
    }
}
