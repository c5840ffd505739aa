use super::{GlobalOptions, Readline};

use ansi_term::{Colour, Style};
use rand::RngCore;
use regex::Regex;

use bitgame::byte::BYTE_WIDTH;
use bitgame::game::{self, ActionError, Direction, Mode, Session};

use std::io;

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Generate,
    Mode(Mode),
    Shift(Direction),
    Mask(String),
    Show,
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> Result<Input, String> {
    let pat = Regex::new(r"^(?P<cmd>\S+)(?:\s+(?P<arg>\S+))?$").unwrap();
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Show);
    }
    let caps = match pat.captures(line) {
        None => return Err(format!("Unable to parse input: '{}'", line)),
        Some(caps) => caps,
    };
    let cmd = caps.name("cmd").map(|m| m.as_str()).unwrap_or("");
    let arg = caps.name("arg").map(|m| m.as_str());
    match (cmd, arg) {
        ("g", None) | ("generate", None) => Ok(Input::Generate),
        ("<", None) | ("left", None) => Ok(Input::Shift(Direction::Left)),
        (">", None) | ("right", None) => Ok(Input::Shift(Direction::Right)),
        ("s", None) | ("show", None) => Ok(Input::Show),
        ("h", None) | ("help", None) | ("?", None) => Ok(Input::Help),
        ("q", None) | ("quit", None) => Ok(Input::Quit),
        ("mode", Some(m)) => m.parse().map(Input::Mode),
        ("m", Some(m)) | ("mask", Some(m)) => Ok(Input::Mask(m.to_owned())),
        (c, None) if c.chars().all(|ch| ch.is_ascii_digit()) => Ok(Input::Mask(c.to_owned())),
        (c, None) => c
            .parse()
            .map(Input::Mode)
            .map_err(|_| format!("Unknown command: '{}' (try `help`)", c)),
        (c, Some(_)) => Err(format!("Unknown command: '{}' (try `help`)", c)),
    }
}

fn bit_style(color: bool, matches: bool) -> Style {
    if !color {
        Style::default()
    } else if matches {
        Colour::Green.bold()
    } else {
        Colour::Red.normal()
    }
}

pub fn render(out: &mut dyn io::Write, s: &Session, color: bool) -> Result<(), io::Error> {
    let round = match s.round() {
        None => {
            writeln!(out, "No round in play; `generate` starts one.")?;
            return Ok(());
        }
        Some(r) => r,
    };
    writeln!(
        out,
        "target:  {}  ({})",
        round.target,
        round.target.to_denary()
    )?;
    write!(out, "current: ")?;
    for i in 0..BYTE_WIDTH {
        let bit = round.current.bit(i);
        let ch = if bit { "1" } else { "0" };
        write!(out, "{}", bit_style(color, bit == round.target.bit(i)).paint(ch))?;
    }
    writeln!(out, "  ({})", round.current.to_denary())?;
    writeln!(
        out,
        "steps: {}  mode: {}",
        round.steps,
        round.mode.map(|m| m.as_str()).unwrap_or("-")
    )?;
    if let Some(sol) = s.solution() {
        let plural = if round.steps == 1 { "" } else { "s" };
        writeln!(out, "Solved in {} step{}. Quickest solution:", round.steps, plural)?;
        for line in sol.messages() {
            writeln!(out, "  {}", line)?;
        }
    }
    Ok(())
}

pub struct Game<'a> {
    opt: &'a GlobalOptions,
    stdin: &'a dyn Readline,
    stdout: &'a mut dyn io::Write,
    session: Session,
}

impl<'a> Game<'a> {
    pub fn new(
        opt: &'a GlobalOptions,
        stdin: &'a dyn Readline,
        stdout: &'a mut dyn io::Write,
    ) -> Self {
        Game {
            opt,
            stdin,
            stdout,
            session: Session::new(),
        }
    }

    pub fn run(&mut self, rng: &mut dyn RngCore) -> Result<(), io::Error> {
        self.help()?;
        loop {
            render(self.stdout, &self.session, !self.opt.no_color)?;
            write!(self.stdout, "> ")?;
            self.stdout.flush()?;

            let mut line = String::new();
            if self.stdin.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match parse_input(&line) {
                Ok(Input::Quit) => return Ok(()),
                Ok(input) => self.handle(input, rng)?,
                Err(e) => writeln!(self.stdout, "{}", e)?,
            }
        }
    }

    fn help(&mut self) -> Result<(), io::Error> {
        writeln!(self.stdout, "Bitwise Manipulation Game")?;
        for line in game::HELP {
            writeln!(self.stdout, "  {}", line)?;
        }
        writeln!(
            self.stdout,
            "commands: generate, logical, arithmetic, and, or, <, >, <mask bits>, help, quit"
        )?;
        Ok(())
    }

    fn handle(&mut self, input: Input, rng: &mut dyn RngCore) -> Result<(), io::Error> {
        let before = self.session.round().map(|r| r.current);
        let result = match input {
            Input::Generate => {
                let round = self.session.generate(rng);
                if self.opt.debug > 1 {
                    writeln!(
                        self.stdout,
                        "generate start={} target={}",
                        round.start, round.target
                    )?;
                }
                return Ok(());
            }
            Input::Mode(mode) => self.session.select_mode(mode).map(|_| None),
            Input::Shift(direction) => self.session.shift(direction).map(Some),
            Input::Mask(ref mask) => self.session.submit_mask(mask).map(Some),
            Input::Show => return Ok(()),
            Input::Help => return self.help(),
            Input::Quit => return Ok(()),
        };
        match result {
            Ok(Some(op)) => {
                if self.opt.debug > 1 {
                    let after = self.session.round().map(|r| r.current);
                    if let (Some(before), Some(after)) = (before, after) {
                        writeln!(self.stdout, "op={} before={} after={}", op, before, after)?;
                    }
                }
            }
            Ok(None) => (),
            Err(ActionError::NotActive) => {
                writeln!(self.stdout, "No round in play; `generate` starts one.")?;
            }
            Err(ActionError::WrongMode) => match input {
                Input::Shift(_) => writeln!(self.stdout, "Select `logical` or `arithmetic` first.")?,
                _ => writeln!(self.stdout, "Select `and` or `or` first.")?,
            },
            Err(ActionError::InvalidMask(why)) => {
                writeln!(self.stdout, "Invalid mask ({:?}); nothing applied.", why)?;
            }
        }
        Ok(())
    }
}
