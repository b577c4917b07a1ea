use std::fmt;

use serde::{Deserialize, Serialize};

/// Job-domain label used to pick a destination channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobCategory {
    Sales,
    Marketing,
    Finance,
    Healthcare,
    #[serde(rename = "product")]
    ProductManagement,
    SupplyChain,
    ProjectManagement,
    #[serde(rename = "hr")]
    HumanResources,
    /// Engineering, data, QA, IT, security and anything else unmatched.
    #[default]
    Tech,
}

impl JobCategory {
    pub const ALL: [JobCategory; 9] = [
        JobCategory::Sales,
        JobCategory::Marketing,
        JobCategory::Finance,
        JobCategory::Healthcare,
        JobCategory::ProductManagement,
        JobCategory::SupplyChain,
        JobCategory::ProjectManagement,
        JobCategory::HumanResources,
        JobCategory::Tech,
    ];

    /// Stable key, matches the serde representation.
    pub fn slug(self) -> &'static str {
        match self {
            JobCategory::Sales => "sales",
            JobCategory::Marketing => "marketing",
            JobCategory::Finance => "finance",
            JobCategory::Healthcare => "healthcare",
            JobCategory::ProductManagement => "product",
            JobCategory::SupplyChain => "supply-chain",
            JobCategory::ProjectManagement => "project-management",
            JobCategory::HumanResources => "hr",
            JobCategory::Tech => "tech",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            JobCategory::Sales => "Sales",
            JobCategory::Marketing => "Marketing",
            JobCategory::Finance => "Finance",
            JobCategory::Healthcare => "Healthcare",
            JobCategory::ProductManagement => "Product Management",
            JobCategory::SupplyChain => "Supply Chain",
            JobCategory::ProjectManagement => "Project Management",
            JobCategory::HumanResources => "Human Resources",
            JobCategory::Tech => "Software/Tech",
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_slug() {
        for category in JobCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.slug()));
        }
    }
}
