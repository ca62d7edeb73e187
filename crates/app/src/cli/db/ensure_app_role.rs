use clap::Args;
use sqlx::{Postgres, Transaction, query, query_scalar};

use crate::cli::args::DatabaseArgs;

/// Table privileges of the API role. Catalog data is read-only to the API and order
/// history is append-only; only carts and wishlists ever lose rows.
const TABLE_PRIVILEGES: &[(&str, &str)] = &[
    ("customers", "SELECT, UPDATE"),
    ("api_tokens", "SELECT, UPDATE"),
    ("categories", "SELECT"),
    ("brands", "SELECT"),
    ("products", "SELECT"),
    ("deals", "SELECT"),
    ("deal_products", "SELECT"),
    ("cart_lines", "SELECT, INSERT, UPDATE, DELETE"),
    ("wishlist_entries", "SELECT, INSERT, DELETE"),
    ("orders", "SELECT, INSERT, UPDATE"),
    ("order_lines", "SELECT, INSERT"),
    ("order_status_events", "SELECT, INSERT"),
    ("order_returns", "SELECT, INSERT"),
];

/// Create or update the role the JSON API connects as.
#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative connection; needs CREATEROLE
    #[command(flatten)]
    database: DatabaseArgs,

    /// Role name
    #[arg(long, default_value = "storefront_app")]
    role_name: String,

    /// Role password
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), String> {
    if args.role_name.trim().is_empty() || args.password.trim().is_empty() {
        return Err("role name and password are both required".to_string());
    }

    let pool = args.database.connect().await?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    let role = quote(&mut tx, "quote_ident", &args.role_name).await?;
    let password = quote(&mut tx, "quote_literal", &args.password).await?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(&args.role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to look up role: {error}"))?;

    let verb = if exists { "ALTER" } else { "CREATE" };

    // Row level security isolates customers only while the role cannot bypass it.
    let mut statements = vec![format!(
        "{verb} ROLE {role} LOGIN PASSWORD {password} \
         NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS"
    )];

    let database: String = query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to resolve database name: {error}"))?;

    statements.push(format!("GRANT CONNECT ON DATABASE {database} TO {role}"));
    statements.extend(grant_statements(&role));

    for sql in &statements {
        query(sql)
            .execute(&mut *tx)
            .await
            .map_err(|error| format!("failed to apply `{}`: {error}", redact(sql, &password)))?;
    }

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit role changes: {error}"))?;

    println!(
        "{} role {} with access to {} tables",
        if exists { "updated" } else { "created" },
        args.role_name,
        TABLE_PRIVILEGES.len()
    );

    Ok(())
}

/// Quote `value` with a PostgreSQL quoting function; identifiers cannot be bound.
async fn quote(
    tx: &mut Transaction<'_, Postgres>,
    function: &str,
    value: &str,
) -> Result<String, String> {
    query_scalar(&format!("SELECT {function}($1)"))
        .bind(value)
        .fetch_one(&mut **tx)
        .await
        .map_err(|error| format!("failed to {function}: {error}"))
}

/// Schema grants for an already quoted role. Earlier grants are revoked first so a rerun
/// also takes privileges away.
fn grant_statements(role: &str) -> Vec<String> {
    let mut statements = vec![
        format!("GRANT USAGE ON SCHEMA public TO {role}"),
        format!("REVOKE ALL ON ALL TABLES IN SCHEMA public FROM {role}"),
    ];

    statements.extend(
        TABLE_PRIVILEGES
            .iter()
            .map(|(table, privileges)| format!("GRANT {privileges} ON {table} TO {role}")),
    );

    statements
}

fn redact(sql: &str, password: &str) -> String {
    sql.replace(password, "'***'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIGRATIONS: [&str; 4] = [
        include_str!("../../../../../migrations/20250601000000_create_customers.sql"),
        include_str!("../../../../../migrations/20250601000100_create_catalog.sql"),
        include_str!("../../../../../migrations/20250601000200_create_carts.sql"),
        include_str!("../../../../../migrations/20250601000300_create_orders.sql"),
    ];

    #[test]
    fn every_migrated_table_has_privileges() {
        let tables: Vec<&str> = MIGRATIONS
            .iter()
            .flat_map(|sql| sql.lines())
            .filter_map(|line| line.strip_prefix("CREATE TABLE "))
            .filter_map(|rest| rest.split_whitespace().next())
            .collect();

        assert!(!tables.is_empty());

        for table in tables {
            assert!(
                TABLE_PRIVILEGES.iter().any(|(name, _)| *name == table),
                "no privileges listed for {table}"
            );
        }
    }

    #[test]
    fn order_history_cannot_be_deleted_or_rewritten() {
        for table in ["order_lines", "order_status_events", "order_returns"] {
            let privileges = TABLE_PRIVILEGES
                .iter()
                .find(|(name, _)| *name == table)
                .map(|(_, privileges)| *privileges);

            assert_eq!(privileges, Some("SELECT, INSERT"), "{table}");
        }

        let grants = grant_statements("\"storefront_app\"");

        assert!(
            grants.iter().all(|sql| !sql.contains("DELETE ON order")),
            "{grants:?}"
        );
    }

    #[test]
    fn revoke_runs_before_table_grants() {
        let grants = grant_statements("app");

        assert_eq!(
            grants.get(1).map(String::as_str),
            Some("REVOKE ALL ON ALL TABLES IN SCHEMA public FROM app")
        );
        assert_eq!(grants.len(), TABLE_PRIVILEGES.len() + 2);
    }

    #[test]
    fn failed_statement_hides_password() {
        let sql = "ALTER ROLE app LOGIN PASSWORD 'hunter2' NOSUPERUSER";

        assert_eq!(
            redact(sql, "'hunter2'"),
            "ALTER ROLE app LOGIN PASSWORD '***' NOSUPERUSER"
        );
    }
}
