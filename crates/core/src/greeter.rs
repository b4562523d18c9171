use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::record::GreetingRecord;

/// Object that displays a greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeter {
    greeting: String,
}

impl Greeter {
    /// Constructs a new `Greeter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dtimelog_core::Greeter;
    ///
    /// let greeter = Greeter::new("Hello");
    /// assert_eq!(greeter.greeting_text(), "Hello");
    /// ```
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
        }
    }

    /// Returns the greeting this greeter was built with.
    pub fn greeting_text(&self) -> &str {
        &self.greeting
    }

    /// Returns the greeting addressed to `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dtimelog_core::Greeter;
    ///
    /// let greeter = Greeter::new("Hello");
    /// assert_eq!(greeter.greeting("World"), "Hello World");
    /// ```
    pub fn greeting(&self, name: &str) -> String {
        format!("{} {}", self.greeting, name)
    }

    /// Writes the greeting for `name` as a single line.
    pub fn greet_to<W: Write>(&self, out: &mut W, name: &str) -> io::Result<()> {
        writeln!(out, "{}", self.greeting(name))
    }

    /// Prints the greeting for `name` to stdout.
    pub fn greet(&self, name: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.greet_to(&mut handle, name)?;
        handle.flush()
    }

    /// Builds the log record for greeting `name` at `at`.
    pub fn record(&self, name: &str, at: DateTime<Utc>) -> GreetingRecord {
        GreetingRecord {
            greeting: self.greeting.clone(),
            name: name.to_string(),
            message: self.greeting(name),
            greeted_at: at,
        }
    }
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new("Hello")
    }
}
