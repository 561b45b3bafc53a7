//! Bun API server co-located with a Vite frontend

use super::Artifact;
use crate::plan::Plan;
use std::path::Path;

pub const BACKEND_DIR: &str = "backend";
pub const BACKEND_PORT: u16 = 3001;

pub fn server_artifact() -> Artifact {
    let content = format!(
        r#"const server = Bun.serve({{
  port: {},
  fetch(req) {{
    const url = new URL(req.url);

    if (url.pathname === "/api/hello") {{
      return Response.json({{ message: "Hello from Bun!" }});
    }}

    return new Response("Not Found", {{ status: 404 }});
  }},
}});

console.log("Bun API server running at " + server.url);
"#,
        BACKEND_PORT
    );
    Artifact::new(Path::new(BACKEND_DIR).join("index.ts"), content)
}

pub fn package_artifact(plan: &Plan) -> Artifact {
    let content = format!(
        r#"{{
  "name": "{}-backend",
  "private": true,
  "type": "module",
  "scripts": {{
    "dev": "bun --hot index.ts",
    "start": "bun index.ts"
  }}
}}
"#,
        plan.name
    );
    Artifact::new(Path::new(BACKEND_DIR).join("package.json"), content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_package_is_valid_json() {
        let plan = Plan {
            name: "demo-app".to_string(),
            ..Plan::default()
        };
        let parsed: serde_yaml::Value =
            serde_yaml::from_str(&package_artifact(&plan).content).unwrap();
        assert_eq!(parsed["name"].as_str(), Some("demo-app-backend"));
    }

    #[test]
    fn test_server_listens_on_backend_port() {
        let server = server_artifact().content;
        assert!(server.contains("port: 3001,"));
        assert!(server.contains("\"/api/hello\""));
    }
}
