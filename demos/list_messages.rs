use std::io;

use smsgate::{Credentials, Driver, ListOptions, Sms77Driver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = std::env::var("SMS77_USER").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS77_USER environment variable is required",
        )
    })?;
    let password = std::env::var("SMS77_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS77_PASSWORD environment variable is required",
        )
    })?;

    let driver = Sms77Driver::builder(Credentials::new(username, password)?).build()?;
    let messages = driver.list_messages(&ListOptions::default()).await?;
    for message in &messages {
        println!(
            "{} from {} to {}: {}",
            message.id(),
            message.from(),
            message.to(),
            message.message()
        );
    }
    println!("{} message(s)", messages.len());

    Ok(())
}
