use std::io;

use smsgate::{Credentials, Driver, DriverError, OutgoingMessage, RawPhoneNumber, Sms77Driver};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = required_env("SMS77_USER")?;
    let password = required_env("SMS77_PASSWORD")?;
    let phone_raw = required_env("SMS77_PHONE")?;
    let message = std::env::var("SMS77_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsgate demo.".to_owned());
    let debug = std::env::var("SMS77_DEBUG").is_ok_and(|value| value == "1");

    let driver = Sms77Driver::builder(Credentials::new(username, password)?)
        .debug(debug)
        .build()?;
    let outgoing = OutgoingMessage::new(message).to(RawPhoneNumber::new(phone_raw)?);

    match driver.send(&outgoing).await {
        Ok(response) => println!("accepted: status {} body {:?}", response.status, response.body),
        Err(DriverError::NotSent(err)) => {
            println!(
                "not sent: kind {:?}, carrier code {}, retryable {}: {}",
                err.kind,
                err.carrier_code,
                err.kind.is_retryable(),
                err.detail
            );
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
