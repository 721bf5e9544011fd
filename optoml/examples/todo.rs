//! Break a task down into a todo list with a named OpenAI driver.
//!
//! ```sh
//! OPENAI_API_KEY=sk-... cargo run --example todo
//! ```

use optoml::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Client::for_model("gpt-3.5")?.with_api_key(std::env::var("OPENAI_API_KEY")?);

    client.test_credential().await?;

    let options = OptionSet::new().with_option(
        ResponseOption::new("todos")
            .with_field("tasks", FieldSpec::array("the tasks to complete")),
    );

    let result = client
        .send_simple(
            "Break the task the user passes in down to a series of steps.",
            "Make a todo list app",
            &options,
            ExchangeSettings::new().max_tokens(1024),
        )
        .await?;

    println!("{}: {:#?}", result.selection, result.data["tasks"]);

    Ok(())
}
