//! Skeleton renderer: materializes the maximal project tree.
//!
//! The pruning pipeline expects a tree "populated as if every conditional
//! block rendered" — this adapter produces exactly that: every base file
//! plus every path the pruning manifest knows about, with `{{key}}`
//! placeholders substituted from the decision context. The context is also
//! dropped into the project as `.fastgen.json` so a generated tree records
//! the decisions that produced it.
//!
//! Substitution is deliberately dumb (no conditionals, no loops): the
//! conditional structure of the output lives in the manifest, not in the
//! file contents, so both executors keep reading the same decision keys.
//! An unknown placeholder is a rendering error, mirroring how the pruner
//! treats an unknown manifest key — both surfaces enforce the compiled key
//! set.

use std::path::Path;

use fastgen_core::{
    application::{ApplicationError, ports::{Filesystem, TemplateRenderer}},
    domain::{ContextValue, DecisionContext, manifest::PRUNE_MANIFEST},
    error::FastgenResult,
};
use tracing::{debug, instrument};

/// A base file rendered into every project before pruning.
struct FileStub {
    path: &'static str,
    content: &'static str,
}

/// Unconditional scaffolding plus the concrete children of directory-level
/// manifest rules. Conditional files the manifest tracks individually are
/// generated from [`stub_for`] instead of being listed here.
static BASE_FILES: &[FileStub] = &[
    FileStub {
        path: "README.md",
        content: "# {{project_name}}\n\n{{project_description}}\n\n\
                  Generated by {{generator_name}} {{generator_version}} at {{generated_at}}.\n",
    },
    FileStub {
        path: ".gitignore",
        content: "__pycache__/\n.venv/\n.env\nnode_modules/\n",
    },
    FileStub {
        path: "docker-compose.yml",
        content: "# docker-compose stack for {{project_name}} (backend port {{backend_port}})\n",
    },
    FileStub {
        path: ".dockerignore",
        content: ".venv/\nnode_modules/\n",
    },
    FileStub {
        path: "Makefile",
        content: "# Development tasks for {{project_name}}\n",
    },
    FileStub {
        path: ".pre-commit-config.yaml",
        content: "# pre-commit hooks\n",
    },
    FileStub {
        path: ".gitlab-ci.yml",
        content: "# GitLab CI pipeline for {{project_name}}\n",
    },
    FileStub {
        path: ".github/workflows/ci.yml",
        content: "# GitHub Actions pipeline for {{project_name}}\n",
    },
    FileStub {
        path: "kubernetes/deployment.yaml",
        content: "# Deployment manifest for {{project_slug}}\n",
    },
    FileStub {
        path: "kubernetes/service.yaml",
        content: "# Service manifest for {{project_slug}}\n",
    },
    FileStub {
        path: "nginx/nginx.conf",
        content: "# Nginx reverse proxy configuration\n",
    },
    // ── Backend ──────────────────────────────────────────────────────────────
    FileStub {
        path: "backend/pyproject.toml",
        content: "[project]\nname = \"{{project_slug}}\"\n\
                  description = \"{{project_description}}\"\n\
                  requires-python = \">={{python_version}}\"\n",
    },
    FileStub {
        path: "backend/.env",
        content: "PROJECT_NAME={{project_name}}\nBACKEND_PORT={{backend_port}}\n",
    },
    FileStub {
        path: "backend/Dockerfile",
        content: "FROM python:{{python_version}}-slim\n",
    },
    FileStub {
        path: "backend/alembic.ini",
        content: "# Alembic configuration for {{project_slug}}\n",
    },
    FileStub {
        path: "backend/alembic/env.py",
        content: "\"\"\"Alembic migration environment.\"\"\"\n",
    },
    FileStub {
        path: "backend/app/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/main.py",
        content: "\"\"\"{{project_name}} application entrypoint.\"\"\"\n",
    },
    FileStub {
        path: "backend/app/core/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/core/config.py",
        content: "\"\"\"Application settings for {{project_slug}}.\"\"\"\n",
    },
    FileStub {
        path: "backend/app/api/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/api/routes/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/api/routes/v1/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/api/routes/v1/health.py",
        content: "\"\"\"Liveness and readiness endpoints.\"\"\"\n",
    },
    FileStub {
        path: "backend/app/db/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/db/models/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/repositories/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/services/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/schemas/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/clients/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/agents/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/worker/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/app/worker/tasks/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/tests/__init__.py",
        content: "",
    },
    FileStub {
        path: "backend/tests/test_health.py",
        content: "\"\"\"Health endpoint tests.\"\"\"\n",
    },
    // ── Frontend ─────────────────────────────────────────────────────────────
    FileStub {
        path: "frontend/package.json",
        content: "{\n  \"name\": \"{{project_slug}}\",\n  \"private\": true\n}\n",
    },
    FileStub {
        path: "frontend/.env.local",
        content: "NEXT_PUBLIC_API_URL=http://localhost:{{backend_port}}\n",
    },
    FileStub {
        path: "frontend/Dockerfile",
        content: "FROM oven/bun:1\n",
    },
    FileStub {
        path: "frontend/src/app/layout.tsx",
        content: "// Root layout for {{project_name}}\n",
    },
    FileStub {
        path: "frontend/src/app/page.tsx",
        content: "// Landing page\n",
    },
    FileStub {
        path: "frontend/src/app/providers.tsx",
        content: "// Client-side providers\n",
    },
    FileStub {
        path: "frontend/messages/en.json",
        content: "{}\n",
    },
];

/// Renders the full skeleton tree through the filesystem port.
pub struct SkeletonRenderer {
    filesystem: Box<dyn Filesystem>,
}

impl SkeletonRenderer {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }
}

impl TemplateRenderer for SkeletonRenderer {
    #[instrument(skip_all, fields(root = %output_root.display()))]
    fn render(&self, ctx: &DecisionContext, output_root: &Path) -> FastgenResult<()> {
        self.filesystem.create_dir_all(output_root)?;

        let mut written = 0usize;
        let mut write = |rel: &str, content: &str| -> FastgenResult<()> {
            let path = output_root.join(rel);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, content)?;
            written += 1;
            Ok(())
        };

        for stub in BASE_FILES {
            write(stub.path, &substitute(stub.content, ctx)?)?;
        }

        // Every conditional path gets materialized; the pruner decides what
        // stays. Directory-level rules are covered by their children above.
        for rule in PRUNE_MANIFEST {
            if is_covered(rule.path) {
                continue;
            }
            write(rule.path, &stub_for(rule.path))?;
        }

        // Provenance: the exact decision context that produced this tree.
        let provenance = serde_json::to_string_pretty(ctx).map_err(|e| {
            ApplicationError::RenderingFailed {
                reason: format!("failed to serialize context: {e}"),
            }
        })?;
        write(".fastgen.json", &provenance)?;

        debug!(files = written, "skeleton rendered");
        Ok(())
    }
}

/// Is this manifest path already produced by the base file set — either
/// directly or as a directory whose children are listed there?
fn is_covered(path: &str) -> bool {
    BASE_FILES.iter().any(|f| {
        f.path == path
            || (f.path.len() > path.len()
                && f.path.starts_with(path)
                && f.path.as_bytes()[path.len()] == b'/')
    })
}

/// Default stub content for a conditional file, keyed off its extension.
fn stub_for(path: &str) -> String {
    let name = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path);
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("py") => format!("\"\"\"{name} module.\"\"\"\n"),
        Some("ts" | "tsx") => format!("// {name}\n"),
        Some("json") => "{}\n".to_string(),
        _ => format!("# {name}\n"),
    }
}

/// Replace `{{key}}` placeholders with context values.
///
/// Unknown keys and unterminated placeholders are rendering errors: a
/// template may only reference compiled decision keys.
fn substitute(template: &str, ctx: &DecisionContext) -> FastgenResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(ApplicationError::RenderingFailed {
                reason: "unterminated placeholder".into(),
            }
            .into());
        };
        let key = after[..end].trim();
        match ctx.get(key) {
            Some(ContextValue::Text(value)) => out.push_str(value),
            Some(ContextValue::Bool(flag)) => out.push_str(if *flag { "true" } else { "false" }),
            None => {
                return Err(ApplicationError::RenderingFailed {
                    reason: format!("template references unknown context key '{key}'"),
                }
                .into());
            }
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
