//! Line-oriented operator prompts.
//!
//! Every reader re-asks until the input is valid. End of input surfaces as
//! `io::ErrorKind::UnexpectedEof` so the session can stop cleanly.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use pn_core::validate_name;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one line.
    pub fn say(&mut self, msg: impl Display) -> io::Result<()> {
        writeln!(self.output, "{msg}")
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(line.trim().to_string())
    }

    fn ask_parsed<T: FromStr>(
        &mut self,
        prompt: &str,
        retry: &str,
        accept: impl Fn(&T) -> bool,
    ) -> io::Result<T> {
        let mut answer = self.ask(prompt)?;
        loop {
            match answer.parse::<T>() {
                Ok(value) if accept(&value) => return Ok(value),
                _ => answer = self.ask(retry)?,
            }
        }
    }

    /// Free text, possibly empty.
    pub fn line(&mut self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)
    }

    /// A record name: non-empty, single line, no `|`.
    pub fn name(&mut self, prompt: &str) -> io::Result<String> {
        let mut answer = self.ask(prompt)?;
        loop {
            match validate_name(&answer) {
                Ok(name) => return Ok(name),
                Err(err) => {
                    self.say(format_args!("Invalid input: {err}"))?;
                    answer = self.ask(prompt)?;
                }
            }
        }
    }

    pub fn positive_f64(&mut self, prompt: &str) -> io::Result<f64> {
        self.ask_parsed(prompt, "Invalid input. Enter positive number: ", |v: &f64| {
            v.is_finite() && *v > 0.0
        })
    }

    pub fn positive_u32(&mut self, prompt: &str) -> io::Result<u32> {
        self.ask_parsed(prompt, "Invalid input. Enter positive number: ", |v: &u32| {
            *v > 0
        })
    }

    pub fn f64_in(&mut self, prompt: &str, min: f64, max: f64) -> io::Result<f64> {
        let retry = format!("Invalid input. Enter number between {min} and {max}: ");
        self.ask_parsed(prompt, &retry, |v: &f64| (min..=max).contains(v))
    }

    pub fn u32_in(&mut self, prompt: &str, min: u32, max: u32) -> io::Result<u32> {
        let retry = format!("Invalid input. Enter number between {min} and {max}: ");
        self.ask_parsed(prompt, &retry, |v: &u32| (min..=max).contains(v))
    }

    pub fn yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(matches!(answer.as_str(), "y" | "Y" | "yes" | "Yes"))
    }

    /// Space-separated 1-based positions up to `max`; anything else is skipped.
    pub fn positions(&mut self, prompt: &str, max: usize) -> io::Result<Vec<usize>> {
        let answer = self.ask(prompt)?;
        let mut picked = Vec::new();
        for n in answer
            .split_whitespace()
            .filter_map(|w| w.parse::<usize>().ok())
        {
            if (1..=max).contains(&n) && !picked.contains(&(n - 1)) {
                picked.push(n - 1);
            }
        }
        Ok(picked)
    }
}
