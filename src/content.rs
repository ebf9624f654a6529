//! Static landing page content.

use serde::Serialize;

use crate::models::Project;

#[derive(Debug, Clone, Serialize)]
pub struct Skill {
    pub label: &'static str,
    pub value: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Highlight {
    pub label: &'static str,
    pub value: u32,
    pub suffix: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub name: &'static str,
    pub url: &'static str,
}

pub const CONTACT_PHONE: &str = "+55 16 98221-7569";
pub const CONTACT_EMAIL: &str = "luan44177@gmail.com";

pub const SKILLS: &[Skill] = &[
    Skill { label: "Next.js", value: 95 },
    Skill { label: "TypeScript", value: 92 },
    Skill { label: "Express", value: 90 },
    Skill { label: "MariaDB", value: 88 },
    Skill { label: "React", value: 85 },
    Skill { label: "Node.js", value: 80 },
    Skill { label: "Python", value: 75 },
    Skill { label: "C / C++", value: 40 },
];

pub const HIGHLIGHTS: &[Highlight] = &[
    Highlight { label: "Projetos entregues", value: 250, suffix: "+" },
    Highlight { label: "Satisfação de clientes", value: 95, suffix: "%" },
    Highlight { label: "Leads gerados", value: 1800, suffix: "+" },
    Highlight { label: "Usuários impactados", value: 12000, suffix: "+" },
];

pub const TOOLS: &[Tool] = &[
    Tool { name: "React", url: "https://react.dev" },
    Tool { name: "Next.js", url: "https://nextjs.org" },
    Tool { name: "JavaScript", url: "https://developer.mozilla.org/docs/Web/JavaScript" },
    Tool { name: "Node.js", url: "https://nodejs.org" },
    Tool { name: "Express", url: "https://expressjs.com" },
    Tool { name: "PostgreSQL", url: "https://www.postgresql.org" },
    Tool { name: "MariaDB", url: "https://mariadb.org" },
    Tool { name: "Figma", url: "https://www.figma.com" },
    Tool { name: "C++", url: "https://isocpp.org" },
    Tool { name: "Python", url: "https://www.python.org" },
    Tool { name: "C", url: "https://en.cppreference.com/w/c" },
];

/// Shown when the backend cannot provide the project list.
pub fn fallback_projects() -> Vec<Project> {
    [
        ("1", "Flowstate - Web App", "Redesign de e-commerce com UI moderna", "/static/imagem2.jpg"),
        ("2", "Redsun Dashboard", "Dashboard analytics com foco em dados", "/static/imagem1.jpg"),
        ("3", "Portfolio Visual", "Landing designer com micro-interações", "/static/imagem4.jpg"),
    ]
    .into_iter()
    .map(|(id, name, description, link)| Project {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        is_preview: false,
        link: link.to_string(),
        created_at: None,
    })
    .collect()
}
