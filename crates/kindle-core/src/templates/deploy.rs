//! Container and static-host deployment files
//!
//! Every file is generated per bundler. Safe removal accepts the shape for
//! either bundler, plus the older compose file that still carried a
//! `version:` header.

use super::Artifact;
use crate::plan::{Bundler, Plan};

pub const DOCKERFILE: &str = "Dockerfile";
pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const VERCEL_FILE: &str = "vercel.json";
pub const NETLIFY_FILE: &str = "netlify.toml";

fn dockerfile(bundler: Bundler) -> String {
    let build = match bundler {
        Bundler::Vite => {
            r#"FROM node:20-alpine AS base
WORKDIR /app
ENV PNPM_HOME="/pnpm"
ENV PATH="$PNPM_HOME:$PATH"
RUN corepack enable

FROM base AS deps
COPY package.json pnpm-lock.yaml* ./
RUN pnpm install --frozen-lockfile

FROM base AS build
COPY --from=deps /app/node_modules ./node_modules
COPY . .
RUN pnpm run build
"#
        }
        Bundler::Bun => {
            r#"FROM oven/bun:1-alpine AS base
WORKDIR /app

FROM base AS deps
COPY package.json bun.lock* ./
RUN bun install --frozen-lockfile

FROM base AS build
COPY --from=deps /app/node_modules ./node_modules
COPY . .
RUN bun run build
"#
        }
    };

    format!(
        r#"# Build static assets
{build}
# Serve with nginx
FROM nginx:1.27-alpine AS runner
COPY --from=build /app/dist /usr/share/nginx/html
EXPOSE 80
CMD ["nginx", "-g", "daemon off;"]
"#
    )
}

fn compose(bundler: Bundler, legacy_header: bool) -> String {
    let (image, pm) = match bundler {
        Bundler::Vite => ("node:20-alpine", "pnpm"),
        Bundler::Bun => ("oven/bun:1-alpine", "bun"),
    };
    let port = bundler.dev_port();
    let header = if legacy_header { "version: \"3.9\"\n\n" } else { "" };

    format!(
        r#"{header}services:
  dev:
    image: {image}
    working_dir: /app
    command: ["{pm}", "run", "dev", "--host", "0.0.0.0", "--port", "{port}"]
    ports:
      - "{port}:{port}"
    volumes:
      - ./:/app
      - /app/node_modules
    environment:
      NODE_ENV: development
    tty: true

  prod:
    build:
      context: .
      dockerfile: Dockerfile
    ports:
      - "4173:80"
"#
    )
}

/// Runs the project's `build` script. Plain `bun build` is Bun's own bundler.
fn build_command(bundler: Bundler) -> &'static str {
    match bundler {
        Bundler::Vite => "pnpm build",
        Bundler::Bun => "bun run build",
    }
}

/// Build command written by earlier releases for Bun projects
const LEGACY_BUN_BUILD: &str = "bun build";

fn vercel(bundler: Bundler) -> String {
    vercel_with(bundler, build_command(bundler))
}

fn vercel_with(bundler: Bundler, build: &str) -> String {
    let pm = bundler.package_manager();
    format!(
        r#"{{
  "builds": [
    {{
      "src": "package.json",
      "use": "@vercel/static-build",
      "config": {{ "distDir": "dist" }}
    }}
  ],
  "devCommand": "{pm} dev",
  "buildCommand": "{build}",
  "outputDirectory": "dist"
}}
"#
    )
}

fn netlify(bundler: Bundler) -> String {
    netlify_with(build_command(bundler))
}

fn netlify_with(build: &str) -> String {
    format!(
        r#"[build]
command = "{build}"
publish = "dist"

[[redirects]]
from = "/*"
to = "/index.html"
status = 200
"#
    )
}

pub fn dockerfile_artifact(plan: &Plan) -> Artifact {
    Artifact::new(DOCKERFILE, dockerfile(plan.bundler))
        .with_variants(Bundler::all().into_iter().map(dockerfile))
}

pub fn compose_artifact(plan: &Plan) -> Artifact {
    let variants = Bundler::all()
        .into_iter()
        .flat_map(|bundler| [compose(bundler, false), compose(bundler, true)]);
    Artifact::new(COMPOSE_FILE, compose(plan.bundler, false)).with_variants(variants)
}

pub fn vercel_artifact(plan: &Plan) -> Artifact {
    let legacy = vercel_with(Bundler::Bun, LEGACY_BUN_BUILD);
    Artifact::new(VERCEL_FILE, vercel(plan.bundler))
        .with_variants(Bundler::all().into_iter().map(vercel).chain([legacy]))
}

pub fn netlify_artifact(plan: &Plan) -> Artifact {
    let legacy = netlify_with(LEGACY_BUN_BUILD);
    Artifact::new(NETLIFY_FILE, netlify(plan.bundler))
        .with_variants(Bundler::all().into_iter().map(netlify).chain([legacy]))
}
