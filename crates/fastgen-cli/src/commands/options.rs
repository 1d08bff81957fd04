//! Implementation of the `fastgen options` command: the option catalog.

use crate::error::CliResult;
use crate::output::OutputManager;

pub fn execute(output: OutputManager) -> CliResult<()> {
    output.header("Available Options")?;
    output.print("")?;

    output.print("Presets:")?;
    output.print("  --preset production   Full production setup (Redis, Sentry, K8s, etc.)")?;
    output.print("  --preset ai-agent     AI agent with WebSocket streaming")?;
    output.print("  --minimal             Minimal project (no extras)")?;
    output.print("")?;

    output.print("Databases:")?;
    output.print("  --database postgresql  PostgreSQL with asyncpg (async)")?;
    output.print("  --database mongodb     MongoDB with Motor (async)")?;
    output.print("  --database sqlite      SQLite (sync)")?;
    output.print("  --database none        No database")?;
    output.print("  --orm sqlalchemy|sqlmodel  ORM flavour for SQL databases")?;
    output.print("")?;

    output.print("Authentication:")?;
    output.print("  --auth jwt            JWT + user management")?;
    output.print("  --auth api_key        API key (header-based)")?;
    output.print("  --auth both           JWT with API key fallback")?;
    output.print("  --auth none           No authentication")?;
    output.print("  --oauth-google        Google OAuth (requires JWT auth)")?;
    output.print("  --session-management  Session management (requires JWT + database)")?;
    output.print("")?;

    output.print("Background Tasks:")?;
    output.print("  --task-queue none     Framework background tasks only")?;
    output.print("  --task-queue celery   Celery (classic)")?;
    output.print("  --task-queue taskiq   Taskiq (async-native)")?;
    output.print("  --task-queue arq      ARQ (lightweight)")?;
    output.print("  All queues require --redis.")?;
    output.print("")?;

    output.print("Frontend:")?;
    output.print("  --frontend none       API only (no frontend)")?;
    output.print("  --frontend nextjs     Next.js (App Router, TypeScript)")?;
    output.print("  --i18n                Internationalization")?;
    output.print("")?;

    output.print("AI Agent:")?;
    output.print("  --ai-agent                  Enable the AI agent")?;
    output.print("  --ai-framework pydantic_ai|langchain|langgraph|crewai|deepagents")?;
    output.print("  --llm-provider openai|anthropic|openrouter")?;
    output.print("  --conversation-persistence  Persist conversations (requires database)")?;
    output.print("  Note: openrouter is only supported with pydantic_ai.")?;
    output.print("")?;

    output.print("Integrations:")?;
    output.print("  --redis               Redis client")?;
    output.print("  --caching             Response caching (requires --redis)")?;
    output.print("  --rate-limiting       Rate limiting (--rate-limit-storage memory|redis)")?;
    output.print("  --admin-panel         Admin panel (requires SQL database + sqlalchemy)")?;
    output.print("  --websockets          WebSocket support (--websocket-auth none|jwt|api_key)")?;
    output.print("  --file-storage        S3/MinIO file storage")?;
    output.print("  --webhooks            Webhooks (requires database)")?;
    output.print("")?;

    output.print("Observability:")?;
    output.print("  --no-telemetry        Disable telemetry instrumentation")?;
    output.print("  --sentry              Sentry error tracking")?;
    output.print("  --prometheus          Prometheus metrics")?;
    output.print("")?;

    output.print("DevOps:")?;
    output.print("  --no-docker           Disable Docker files")?;
    output.print("  --kubernetes          Kubernetes manifests")?;
    output.print("  --reverse-proxy traefik_included|traefik_external|nginx_included|nginx_external|none")?;
    output.print("  --ci github|gitlab|none")?;
    output.print("")?;

    output.print("Other:")?;
    output.print("  --python-version 3.11|3.12|3.13")?;
    output.print("  --backend-port / --frontend-port")?;
    output.print("  --no-example-crud     Skip example CRUD endpoint")?;
    output.print("  --no-env              Skip .env file generation")?;
    output.print("  --no-tooling          Skip post-generation lockfile/formatting")?;

    Ok(())
}
