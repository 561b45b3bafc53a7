//! Optional stacks that can be added to or removed from an existing project,
//! and the package sets behind every stack

use crate::plan::Bundler;
use clap::ValueEnum;
use std::fmt;

/// One `add`/`remove` target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Stack {
    /// Mantine UI kit, wired into the entry file
    Mantine,
    /// TanStack Query and devtools, wired into the entry file
    ReactQuery,
    /// Zustand with a demo store
    Zustand,
    FramerMotion,
    /// Bulma CSS imported from the global stylesheet
    Bulma,
    /// shadcn/ui on top of Tailwind (interactive init)
    Shadcn,
    Storybook,
    /// Dockerfile and docker-compose.yml
    Docker,
    Vercel,
    Netlify,
}

impl Stack {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stack::Mantine => "Mantine",
            Stack::ReactQuery => "React Query",
            Stack::Zustand => "Zustand",
            Stack::FramerMotion => "Framer Motion",
            Stack::Bulma => "Bulma",
            Stack::Shadcn => "shadcn/ui",
            Stack::Storybook => "Storybook",
            Stack::Docker => "Docker",
            Stack::Vercel => "Vercel",
            Stack::Netlify => "Netlify",
        }
    }

    /// Whether `remove` knows how to undo this stack
    pub fn is_removable(&self) -> bool {
        !matches!(self, Stack::Shadcn)
    }

    /// Package groups installed by `add`, in install order
    pub fn package_groups(&self) -> &'static [PackageGroup] {
        match self {
            Stack::Mantine => &[MANTINE, MANTINE_POSTCSS],
            Stack::ReactQuery => &[REACT_QUERY],
            Stack::Zustand => &[ZUSTAND],
            Stack::FramerMotion => &[FRAMER_MOTION],
            Stack::Bulma => &[BULMA],
            Stack::Storybook => &[STORYBOOK],
            Stack::Shadcn | Stack::Docker | Stack::Vercel | Stack::Netlify => &[],
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Packages installed together, as runtime or development dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageGroup {
    /// Human label used in progress messages
    pub label: &'static str,
    /// Package specs, possibly carrying a version (`name@latest`)
    pub packages: &'static [&'static str],
    pub dev: bool,
}

impl PackageGroup {
    /// Package names without version specifiers, for removal
    pub fn names(&self) -> Vec<&'static str> {
        self.packages.iter().map(|spec| bare_name(spec)).collect()
    }
}

/// Strip a trailing `@version` from a package spec, keeping a leading scope
pub fn bare_name(spec: &str) -> &str {
    match spec.rfind('@') {
        Some(index) if index > 0 => &spec[..index],
        _ => spec,
    }
}

pub const MANTINE: PackageGroup = PackageGroup {
    label: "Mantine packages",
    packages: &[
        "@mantine/core@latest",
        "@mantine/hooks@latest",
        "@mantine/form@latest",
        "@mantine/dates@latest",
        "dayjs@latest",
        "@mantine/charts@latest",
        "recharts@latest",
        "@mantine/notifications@latest",
        "@mantine/code-highlight@latest",
        "@mantine/tiptap@latest",
        "@tiptap/pm@latest",
        "@tiptap/react@latest",
        "@tiptap/extension-link@latest",
        "@tiptap/starter-kit@latest",
        "@mantine/dropzone@latest",
        "@mantine/carousel@latest",
        "embla-carousel@^8.5.2",
        "embla-carousel-react@^8.5.2",
        "@mantine/spotlight@latest",
        "@mantine/modals@latest",
        "@mantine/nprogress@latest",
    ],
    dev: false,
};

pub const MANTINE_POSTCSS: PackageGroup = PackageGroup {
    label: "Mantine PostCSS plugins",
    packages: &[
        "postcss@latest",
        "postcss-preset-mantine@latest",
        "postcss-simple-vars@latest",
    ],
    dev: true,
};

pub const REACT_QUERY: PackageGroup = PackageGroup {
    label: "TanStack Query",
    packages: &[
        "@tanstack/react-query@latest",
        "@tanstack/react-query-devtools@latest",
    ],
    dev: false,
};

pub const ZUSTAND: PackageGroup = PackageGroup {
    label: "Zustand",
    packages: &["zustand@latest"],
    dev: false,
};

pub const FRAMER_MOTION: PackageGroup = PackageGroup {
    label: "Framer Motion",
    packages: &["framer-motion@latest"],
    dev: false,
};

pub const BULMA: PackageGroup = PackageGroup {
    label: "Bulma",
    packages: &["bulma@latest"],
    dev: false,
};

pub const STORYBOOK: PackageGroup = PackageGroup {
    label: "Storybook",
    packages: crate::templates::storybook::STORYBOOK_PACKAGES,
    dev: true,
};

pub const VITE_REACT_PLUGIN: PackageGroup = PackageGroup {
    label: "Vite React plugin",
    packages: &["@vitejs/plugin-react@latest"],
    dev: true,
};

pub const PRETTIER: PackageGroup = PackageGroup {
    label: "Prettier",
    packages: crate::templates::lint::PRETTIER_PACKAGES,
    dev: true,
};

/// Tailwind packages; the Bun build uses the Bun plugin instead of the Vite one
pub fn tailwind(bundler: Bundler) -> PackageGroup {
    let packages: &'static [&'static str] = match bundler {
        Bundler::Vite => &["tailwindcss@latest", "@tailwindcss/vite@latest"],
        Bundler::Bun => &["tailwindcss@^4", "bun-plugin-tailwind@latest"],
    };
    PackageGroup {
        label: "Tailwind CSS",
        packages,
        dev: true,
    }
}

/// Husky and lint-staged; Bun runs `husky-init` as a local package
pub fn husky(bundler: Bundler) -> PackageGroup {
    let packages: &'static [&'static str] = match bundler {
        Bundler::Vite => &["husky@latest", "lint-staged@latest"],
        Bundler::Bun => &["husky@latest", "lint-staged@latest", "husky-init@latest"],
    };
    PackageGroup {
        label: "Husky and lint-staged",
        packages,
        dev: true,
    }
}
