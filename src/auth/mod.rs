//! Login gate in front of the main menu.
//!
//! The credential check is behind [`Authenticator`] so a real backend can
//! replace [`FixedCredentials`] without touching the menu loop.

use crate::terminal::prompt;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Something that can check a username/password pair.
pub trait Authenticator {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// The single demo account. Not a real credential store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCredentials;

impl FixedCredentials {
    const USERNAME: &'static str = "admin";
    const PASSWORD: &'static str = "1234";
}

impl Authenticator for FixedCredentials {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        username == Self::USERNAME && password == Self::PASSWORD
    }
}

/// Attempt limit and cosmetic delays for the login prompt.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub max_attempts: usize,
    /// Pause after a successful attempt.
    pub success_delay: Duration,
    /// Pause after a failed attempt.
    pub failure_delay: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            success_delay: Duration::from_millis(500),
            failure_delay: Duration::from_millis(700),
        }
    }
}

impl From<&crate::config::SessionConfig> for GateConfig {
    fn from(config: &crate::config::SessionConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            success_delay: Duration::from_millis(config.success_delay_ms),
            failure_delay: Duration::from_millis(config.failure_delay_ms),
        }
    }
}

/// Outcome of one prompt round.
enum Attempt {
    Accepted,
    Rejected,
    EndOfInput,
}

/// Interactive login with a bounded number of attempts.
pub struct SessionGate<A: Authenticator> {
    authenticator: A,
    config: GateConfig,
}

impl<A: Authenticator> SessionGate<A> {
    pub fn new(authenticator: A, config: GateConfig) -> Self {
        Self {
            authenticator,
            config,
        }
    }

    /// Prompt until the user logs in or runs out of attempts.
    ///
    /// Returns `Ok(false)` when every attempt failed or input ended.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<bool> {
        for attempt in 1..=self.config.max_attempts {
            match self.attempt(input, output)? {
                Attempt::Accepted => {
                    info!("Login succeeded on attempt {}", attempt);
                    return Ok(true);
                }
                Attempt::EndOfInput => {
                    debug!("Input closed during login");
                    break;
                }
                Attempt::Rejected => {
                    warn!(
                        "Login attempt {}/{} failed",
                        attempt, self.config.max_attempts
                    );
                    if attempt < self.config.max_attempts {
                        writeln!(output, "Try again...")?;
                    }
                }
            }
        }

        writeln!(output, "Too many failed attempts. Exiting.")?;
        output.flush()?;
        Ok(false)
    }

    fn attempt<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<Attempt> {
        writeln!(output, "=== Tradable - Login ===")?;

        let Some(username) = prompt(input, output, "Username: ")? else {
            return Ok(Attempt::EndOfInput);
        };
        let Some(password) = prompt(input, output, "Password: ")? else {
            return Ok(Attempt::EndOfInput);
        };

        debug!("Checking credentials for user {:?}", username);

        if self.authenticator.authenticate(&username, &password) {
            writeln!(output, "Login successful.")?;
            output.flush()?;
            pause(self.config.success_delay);
            Ok(Attempt::Accepted)
        } else {
            writeln!(output, "Login failed.")?;
            output.flush()?;
            pause(self.config.failure_delay);
            Ok(Attempt::Rejected)
        }
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
