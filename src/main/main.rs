mod play;
mod worker;

use ansi_term::Colour;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use structopt::StructOpt;

use bitgame::byte::{notation, Byte, OpKind};
use bitgame::solve;

use std::io;
use std::process::exit;

pub trait Readline {
    fn read_line(&self, buf: &mut String) -> io::Result<usize>;
}

impl Readline for io::Stdin {
    fn read_line(&self, buf: &mut String) -> io::Result<usize> {
        self.read_line(buf)
    }
}

/// Startup configuration shared by every subcommand.
#[derive(Debug, StructOpt, Serialize)]
pub struct GlobalOptions {
    #[structopt(long, default_value = "1")]
    debug: usize,
    #[structopt(long, help = "Seed the byte generator for reproducible rounds")]
    seed: Option<u64>,
    #[structopt(long, help = "Disable colored output")]
    no_color: bool,
    #[structopt(long, help = "Override git sha", default_value = "")]
    git_sha: String,
}

impl GlobalOptions {
    fn make_rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(name = "bitgame", about = "Bitwise Manipulation Game")]
pub struct Opt {
    #[structopt(flatten)]
    global: GlobalOptions,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt, Serialize)]
struct SolveParameters {
    start: String,
    target: String,
}

#[derive(Debug, StructOpt, Serialize)]
struct ApplyParameters {
    #[structopt(help = "lsl, lsr, asl, asr, and, or")]
    operation: OpKind,
    byte: String,
    #[structopt(help = "Shift amount (default 1) or mask")]
    operand: Option<String>,
}

#[derive(Debug, StructOpt)]
enum Command {
    Play {},
    Solve(SolveParameters),
    Apply(ApplyParameters),
    Decode {
        byte: String,
    },
    Generate {
        #[structopt(long, default_value = "1")]
        count: usize,
    },
    Worker {},
}

fn parse_byte(arg: &str) -> Result<Byte, io::Error> {
    notation::canonicalize(arg).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Unable to parse byte '{}': {:?}", arg, e),
        )
    })
}

fn print_solution(opt: &GlobalOptions, sol: &solve::Solution) {
    let title = format!("solution: {}", sol.classification);
    if opt.no_color {
        println!("{}", title);
    } else {
        println!("{}", Colour::Green.bold().paint(title));
    }
    for line in sol.messages() {
        println!("  {}", line);
    }
}

fn main() -> Result<(), std::io::Error> {
    let opt = {
        let mut opt = Opt::from_args();
        if opt.global.git_sha == "" {
            opt.global.git_sha = option_env!("VERGEN_SHA").unwrap_or("unknown").to_owned();
        };
        opt
    };
    if opt.global.debug > 2 {
        eprintln!("bitgame git_sha={}", opt.global.git_sha);
    }
    match opt.cmd {
        Command::Play {} => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let mut rng = opt.global.make_rng();
            let mut game = play::Game::new(&opt.global, &stdin, &mut stdout);
            game.run(&mut *rng)?;
        }
        Command::Solve(ref params) => {
            let start = parse_byte(&params.start)?;
            let target = parse_byte(&params.target)?;
            let sol = solve::solve(target, start);
            if opt.global.debug > 1 {
                println!("start={} target={} verified={}", start, target, sol.verify());
            }
            print_solution(&opt.global, &sol);
        }
        Command::Apply(ref params) => {
            let b = parse_byte(&params.byte)?;
            let op = match params.operation.with_operand(params.operand.as_deref()) {
                Ok(op) => op,
                Err(e) => {
                    println!("{}: {}", params.operation, e);
                    exit(1)
                }
            };
            let out = b.apply(op);
            if opt.global.debug > 1 {
                println!("op={} before={} after={}", op, b, out);
            }
            println!("{} ({})", out, out.to_denary());
        }
        Command::Decode { ref byte } => {
            let b = parse_byte(byte)?;
            println!("{}", b.to_denary());
        }
        Command::Generate { count } => {
            let mut rng = opt.global.make_rng();
            for _ in 0..count {
                let b = Byte::random(&mut *rng);
                println!("{} ({})", b, b.to_denary());
            }
        }
        Command::Worker {} => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let mut rng = opt.global.make_rng();
            let mut worker = worker::Worker::new(&stdin, &mut stdout, &opt.global);
            worker.run(&mut *rng)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_byte() {
        let tests: &[(&'static str, Option<i8>)] = &[
            ("10111000", Some(-72)),
            ("101", Some(-3)),
            ("0101", Some(5)),
            ("1", Some(-1)),
            ("", None),
            ("102", None),
            ("100000000", None),
        ];
        for tc in tests {
            let got = parse_byte(tc.0);
            match (got, tc.1) {
                (Err(..), None) => (),
                (Ok(b), None) => {
                    panic!("parse({}): got {}, expected error", tc.0, b);
                }
                (Err(e), Some(d)) => {
                    panic!("parse({}): got err({:?}), expected {}", tc.0, e, d);
                }
                (Ok(b), Some(d)) => {
                    if b.to_denary() != d {
                        panic!("parse({}): got {}, expected {}", tc.0, b.to_denary(), d);
                    }
                }
            }
        }
    }

    #[test]
    fn test_cli_args() {
        let opt = Opt::from_iter(&["bitgame", "--seed", "5", "apply", "asr", "10111000", "2"]);
        assert_eq!(opt.global.seed, Some(5));
        match opt.cmd {
            Command::Apply(ref p) => {
                assert_eq!(p.operation, OpKind::ArithmeticShiftRight);
                assert_eq!(p.operand.as_deref(), Some("2"));
                let op = p.operation.with_operand(p.operand.as_deref()).unwrap();
                assert_eq!(parse_byte(&p.byte).unwrap().apply(op).to_string(), "10101110");
            }
            ref c => panic!("unexpected command {:?}", c),
        }
        assert!(Opt::from_iter_safe(&["bitgame", "apply", "xor", "1"]).is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let opt = Opt::from_iter(&["bitgame", "--seed", "9", "generate"]);
        let mut a = opt.global.make_rng();
        let mut b = opt.global.make_rng();
        for _ in 0..16 {
            assert_eq!(Byte::random(&mut *a), Byte::random(&mut *b));
        }
    }
}
