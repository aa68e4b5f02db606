use std::{str::FromStr, time::Duration};

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};

/// Connect to MySQL, retrying while the server is still starting up.
pub async fn connect_with_retry(
    database_url: &str,
    max_retries: u32,
) -> Result<MySqlPool, sqlx::Error> {
    let connect_options = MySqlConnectOptions::from_str(database_url)?;
    let mut retries = 0;

    loop {
        match MySqlPoolOptions::new()
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(connect_options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) if retries < max_retries => {
                tracing::warn!(attempt = retries + 1, error = %e, "MySQL not ready yet");
                retries += 1;
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(e) => return Err(e),
        }
    }
}
