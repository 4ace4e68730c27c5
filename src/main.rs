use anyhow::Context;
use colored::Colorize;
use newsletter::configuration::get_configuration;
use newsletter::domain::Field;
use newsletter::form::{SubmitOutcome, SubscriptionForm};
use newsletter::notify::TerminalNotifier;
use newsletter::startup::build;
use newsletter::telemetry::{get_subscriber, init_subscriber};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = get_configuration().context("Failed to read configuration.")?;

    // stdout belongs to the form.
    let subscriber = get_subscriber(
        config.application.name.clone(),
        config.application.log_level.clone(),
        std::io::stderr,
    );
    init_subscriber(subscriber);

    let form = build(&config, TerminalNotifier).context("Failed to build the HTTP client.")?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("\n{}", form.view());

        let view = form.view();
        let name = match prompt(&mut lines, &view.name.label, &form.values().name).await? {
            Some(name) => name,
            None => return Ok(()),
        };
        form.input(Field::Name, name);

        let email = match prompt(&mut lines, &view.email.label, &form.values().email).await? {
            Some(email) => email,
            None => return Ok(()),
        };
        form.input(Field::Email, email);

        match submit(&form).await {
            SubmitOutcome::Invalid(_) | SubmitOutcome::Busy => continue,
            SubmitOutcome::Subscribed(_) | SubmitOutcome::Failed => return Ok(()),
        }
    }
}

async fn submit(form: &SubscriptionForm<TerminalNotifier>) -> SubmitOutcome {
    let submission = form.submit();
    tokio::pin!(submission);

    // The submission flips the form to its loading state as soon as it is polled.
    tokio::select! {
        biased;
        outcome = &mut submission => return outcome,
        _ = tokio::task::yield_now() => {}
    }
    println!("{}", form.view().button.caption.dimmed());
    submission.await
}

/// Reads one line; an empty answer keeps `current`. `None` on end of input.
async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
    current: &str,
) -> Result<Option<String>, anyhow::Error> {
    let mut stdout = tokio::io::stdout();
    let question = if current.is_empty() {
        format!("{}: ", label.bold())
    } else {
        format!("{} [{}]: ", label.bold(), current)
    };
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;

    let line = lines.next_line().await.context("Failed to read from stdin")?;
    Ok(line.map(|line| {
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        if line.is_empty() {
            current.to_string()
        } else {
            line
        }
    }))
}
