//! The fixed catalog of arXiv categories offered for browsing.

use super::*;

/// An arXiv subject category offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
  /// arXiv category code, e.g. `cs.CV`
  pub code: &'static str,
  /// Human-readable name
  pub name: &'static str,
}

/// Every category the catalog knows about, in display order.
pub const CATALOG: [Category; 5] = [
  Category { code: "cs.CV", name: "Computer Vision and Pattern Recognition" },
  Category { code: "cs.AI", name: "Artificial Intelligence" },
  Category { code: "cs.LG", name: "Machine Learning" },
  Category { code: "cs.CL", name: "Computation and Language" },
  Category { code: "cs.RO", name: "Robotics" },
];

/// Category used when a search names none.
pub const DEFAULT_CATEGORY: &str = "cs.CV";

impl Category {
  /// All catalog entries.
  pub fn all() -> &'static [Category] { &CATALOG }

  /// Finds a catalog entry by code, ignoring ASCII case.
  pub fn lookup(code: &str) -> Option<Category> {
    CATALOG.iter().copied().find(|c| c.code.eq_ignore_ascii_case(code.trim()))
  }
}

impl Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ({})", self.code, self.name)
  }
}
