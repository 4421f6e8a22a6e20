use chrono::{Datelike, Timelike};

use crate::{Credential, SnowflakeConfig, SnowflakeResult, Value};

fn default_config() -> SnowflakeConfig {
    let _ = env_logger::try_init();
    let require = |name: &str| std::env::var(name).expect(&format!("{} not set", name));
    SnowflakeConfig {
        credential: Credential::from_pem_file(require("SNOWFLAKE_RSA_KEY_PATH"))
            .expect("failed to load key"),
        account: require("SNOWFLAKE_ACCOUNT"),
        user: require("SNOWFLAKE_USER"),
        database: require("SNOWFLAKE_DATABASE"),
        schema: require("SNOWFLAKE_SCHEMA"),
        warehouse: require("SNOWFLAKE_WAREHOUSE"),
        role: Some(require("SNOWFLAKE_ROLE")),
        timeout: None,
    }
}

#[tokio::test]
async fn can_login_and_read_the_first_row() -> SnowflakeResult<()> {
    let mut conn = default_config().connect().await?;
    let result = conn.execute("SELECT 1").await?;
    assert_eq!(result.total_rows(), 1);
    let row = result.first_row().expect("one row expected");
    assert_eq!(row.values().len(), 1);
    assert!(matches!(row.values()[0], Value::Int(1)));
    conn.close();
    Ok(())
}

#[tokio::test]
async fn empty_result_set_is_a_sentinel_not_an_error() -> SnowflakeResult<()> {
    let mut conn = default_config().connect().await?;
    let result = conn
        .execute("SELECT seq4() FROM table(generator(rowcount => 1)) WHERE 1 = 0")
        .await?;
    assert_eq!(result.total_rows(), 0);
    assert!(result.first_row().is_none());
    Ok(())
}

#[tokio::test]
async fn can_query_many_types() -> SnowflakeResult<()> {
    let mut conn = default_config().connect().await?;
    let result = conn
        .execute(
            "SELECT 1,
            'foo',
            1.1,
            true,
            NULL,
            '666f6f'::binary,
            '2023-01-01'::date,
            '01:01:01'::time,
            '2023-01-01 01:01:01'::timestamp_ntz
        ",
        )
        .await?;
    let row = result.first_row().expect("one row expected");
    assert!(matches!(row.values()[0], Value::Int(1)));
    assert!(matches!(row.values()[1], Value::Text(ref x) if x == "foo"));
    assert!(matches!(row.values()[2], Value::Float(x) if x > 1.0 && x < 1.2));
    assert!(matches!(row.values()[3], Value::Boolean(true)));
    assert!(matches!(row.values()[4], Value::Null));
    assert!(matches!(row.values()[5], Value::Binary(ref x) if x == b"foo"));
    assert!(matches!(row.values()[6],
        Value::Date(ref x)
        if x.year() == 2023
        && x.month() == 1
        && x.day() == 1
    ));
    assert!(matches!(row.values()[7],
        Value::Time(ref x)
        if x.hour() == 1
        && x.minute() == 1
        && x.second() == 1
    ));
    assert!(matches!(row.values()[8],
        Value::TimestampNtz(ref x)
        if x.year() == 2023
        && x.month() == 1
        && x.day() == 1
        && x.hour() == 1
    ));
    Ok(())
}

#[tokio::test]
async fn rejected_statements_surface_the_server_message() -> SnowflakeResult<()> {
    let mut conn = default_config().connect().await?;
    let err = conn
        .execute("SELECT * FROM this_table_does_not_exist")
        .await
        .unwrap_err();
    assert!(matches!(err, crate::SnowflakeError::Query { .. }));
    Ok(())
}
