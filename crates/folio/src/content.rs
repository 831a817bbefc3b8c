#![forbid(unsafe_code)]

//! Static page content.

pub const OWNER: &str = "Homaira Yousufi";

pub const HEADER_MESSAGE: &str = "Welcome to my developer journey!";

pub const QUOTES: [&str; 6] = [
    "Code is poetry written in logic.",
    "Every expert was once a beginner.",
    "The best way to predict the future is to create it.",
    "Technology is best when it brings people together.",
    "Dream big, code bigger.",
    "Learn, build, inspire, repeat.",
];

pub const INITIALS: &str = "HY";

pub const PROFILE_TITLE: &str = "Frontend Developer";

pub const PROFILE_BIO: &str = "I'm a passionate Computer Science student from Afghanistan who enjoys \
building creative and user-friendly websites. I love combining design and technology to create \
digital experiences that make people's lives easier.";

pub const ABOUT_PARAGRAPHS: [&str; 2] = [
    "I'm a passionate Computer Science student from Afghanistan who enjoys building creative and \
     user-friendly websites. I love combining design and technology to create digital experiences \
     that make people's lives easier.",
    "Currently, I'm diving deep into JavaScript, React.js, and Django for web development. My goal \
     is to become a professional full-stack developer and contribute to innovative projects that \
     solve real-world problems and support digital transformation in education.",
];

pub const HOBBIES_TITLE: &str = "Fun Facts & Hobbies";

pub const HOBBIES: [&str; 4] = [
    "Learning new languages and exploring different cultures",
    "Reading motivational books",
    "Designing visuals and working on creative projects",
    "Teaching and helping others learn technology",
];

/// A named skill and its proficiency in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub level: u8,
}

pub const SKILLS: [Skill; 6] = [
    Skill {
        name: "HTML & CSS",
        level: 90,
    },
    Skill {
        name: "JavaScript",
        level: 80,
    },
    Skill {
        name: "React.js",
        level: 70,
    },
    Skill {
        name: "Python",
        level: 75,
    },
    Skill {
        name: "Django",
        level: 65,
    },
    Skill {
        name: "MySQL",
        level: 60,
    },
];

/// Outbound profile link shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink {
        label: "GitHub",
        url: "https://github.com/homaira1379",
    },
    SocialLink {
        label: "LinkedIn",
        url: "https://linkedin.com/in/homaira-yousufi-6983311b5",
    },
    SocialLink {
        label: "Email",
        url: "mailto:humaira.yousufi@gmail.com",
    },
];

pub const BUILT_WITH: &str = "Built with Rust & Passion";

/// Messages the live-update ticker picks from.
pub const UPDATE_MESSAGES: [&str; 8] = [
    "Pushed a new commit to School Management System",
    "Invoice & Client Management App deployed to GitHub Pages",
    "Refactored the Online Book Store search",
    "Added role-based access to Employee Payroll System",
    "Started learning React hooks in depth",
    "Fixed a layout bug on the invoice dashboard",
    "Wrote tests for the attendance module",
    "Reviewed a pull request from a classmate",
];

pub fn copyright(year: i32) -> String {
    format!("\u{a9} {year} {OWNER}. All rights reserved.")
}
