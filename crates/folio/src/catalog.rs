#![forbid(unsafe_code)]

//! Project catalog and tech-tag filtering.
//!
//! The catalog is fixed at startup. Filtered views are recomputed from it on
//! demand and always preserve catalog order.

use std::fmt;

/// Lifecycle badge shown on a project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Live,
}

impl ProjectStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Live => "Live",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub description: String,
    /// Display order is insertion order.
    pub tech_stack: Vec<String>,
    pub featured: bool,
    pub status: ProjectStatus,
    pub live_link: Option<String>,
    pub details: String,
}

impl Project {
    pub fn uses(&self, tag: &str) -> bool {
        self.tech_stack.iter().any(|t| t == tag)
    }
}

/// Currently selected tech tag. `All` is the identity filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TechFilter {
    #[default]
    All,
    Tag(String),
}

impl TechFilter {
    pub const ALL_LABEL: &'static str = "All";

    /// `"All"` maps to the sentinel, anything else is a tag.
    pub fn parse(raw: &str) -> Self {
        if raw == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Tag(raw.to_owned())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Tag(tag) => tag,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => project.uses(tag),
        }
    }
}

impl fmt::Display for TechFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// The four portfolio projects.
    pub fn builtin() -> Self {
        fn project(
            name: &str,
            description: &str,
            tech: &[&str],
            featured: bool,
            status: ProjectStatus,
            live_link: Option<&str>,
            details: &str,
        ) -> Project {
            Project {
                name: name.to_owned(),
                description: description.to_owned(),
                tech_stack: tech.iter().map(|t| (*t).to_owned()).collect(),
                featured,
                status,
                live_link: live_link.map(str::to_owned),
                details: details.to_owned(),
            }
        }

        Self::new(vec![
            project(
                "Online Book Store",
                "A desktop application where users can browse, search, and purchase books with \
                 user accounts, inventory control, and order tracking.",
                &["Python", "MySQL", "Tkinter"],
                true,
                ProjectStatus::Completed,
                None,
                "Built with a Tkinter front end over a normalized MySQL schema. Includes a \
                 shopping cart, order history per account and low-stock alerts for admins.",
            ),
            project(
                "School Management System",
                "Web app to manage students, teachers, classes, and attendance. It includes \
                 dashboards, CRUD operations, and role-based access.",
                &["Django", "HTML", "CSS", "JavaScript"],
                true,
                ProjectStatus::InProgress,
                None,
                "Django models for classes, enrollments and daily attendance, with separate \
                 dashboards for administrators, teachers and students.",
            ),
            project(
                "Invoice & Client Management App",
                "A responsive web app for freelancers to maintain client lists, generate \
                 invoices, and see payment statuses.",
                &["HTML", "CSS", "JavaScript"],
                false,
                ProjectStatus::Live,
                Some("https://homaira1379.github.io/five/"),
                "Runs entirely in the browser and keeps clients and invoices in local storage. \
                 Invoices can be filtered by payment status.",
            ),
            project(
                "Employee Payroll System",
                "A system to manage employee data, payroll processing, and HR tasks, with \
                 support for multiple roles (Admin, HR, Finance).",
                &["Django", "HTML", "CSS", "Bootstrap"],
                false,
                ProjectStatus::Completed,
                None,
                "Monthly payroll runs with deductions and bonuses, payslip export and an audit \
                 trail of HR changes.",
            ),
        ])
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// `All` followed by every distinct tag in first-seen order.
    pub fn available_tags(&self) -> Vec<TechFilter> {
        let mut tags = vec![TechFilter::All];
        for tag in self.projects.iter().flat_map(|p| &p.tech_stack) {
            if !tags.iter().any(|seen| seen.label() == tag) {
                tags.push(TechFilter::Tag(tag.clone()));
            }
        }
        tags
    }

    /// Projects matching `filter`, in catalog order.
    pub fn filter(&self, filter: &TechFilter) -> Vec<&Project> {
        self.projects.iter().filter(|p| filter.matches(p)).collect()
    }
}

impl Default for ProjectCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
