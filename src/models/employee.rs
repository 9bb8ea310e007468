/// A member of the employee directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Employee {
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new("", "All", "Employees")
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn find<'a>(employees: &'a [Employee], needle: &str) -> Option<&'a Employee> {
        let needle = needle.trim();
        if needle.is_empty() {
            return None;
        }
        if let Some(e) = employees.iter().find(|e| e.id == needle) {
            return Some(e);
        }
        let lower = needle.to_lowercase();
        employees
            .iter()
            .find(|e| e.full_name().to_lowercase() == lower)
            .or_else(|| {
                employees
                    .iter()
                    .find(|e| e.full_name().to_lowercase().contains(&lower))
            })
    }
}

impl std::fmt::Display for Employee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
