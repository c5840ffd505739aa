use super::{GlobalOptions, Readline};

use rand::RngCore;
use std::io;

use bitgame::byte;
use bitgame::game::{ActionError, Session};
use bitgame::protocol::{Command, Response};
use bitgame::solve;

/// Drives a `Session` from line-delimited JSON commands. Diagnostics go to
/// stderr; stdout carries only responses.
pub struct Worker<'a> {
    opt: &'a GlobalOptions,
    stdin: &'a dyn Readline,
    stdout: &'a mut dyn io::Write,

    session: Session,
}

fn describe(e: &ActionError) -> String {
    match e {
        ActionError::NotActive => "no round in play".to_owned(),
        ActionError::WrongMode => "operation does not match the selected mode".to_owned(),
        ActionError::InvalidMask(why) => format!("invalid mask: {:?}", why),
    }
}

impl<'a> Worker<'a> {
    pub fn new(
        stdin: &'a dyn Readline,
        stdout: &'a mut dyn io::Write,
        opt: &'a GlobalOptions,
    ) -> Self {
        Worker {
            stdin,
            stdout,
            opt,
            session: Session::new(),
        }
    }

    pub fn run(&mut self, rng: &mut dyn RngCore) -> Result<(), io::Error> {
        loop {
            let mut line = String::new();
            if self.stdin.read_line(&mut line)? == 0 {
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }
            let resp = match serde_json::from_str::<Command>(&line) {
                Ok(Command::Shutdown) => return Ok(()),
                Ok(cmd) => self.handle_command(&cmd, rng),
                Err(e) => Response::Err {
                    error: format!("bad command: {}", e),
                },
            };
            if self.opt.debug > 1 {
                eprintln!("worker request={} response={:?}", line.trim_end(), resp);
            }
            writeln!(self.stdout, "{}", serde_json::to_string(&resp)?)?;
            self.stdout.flush()?;
        }
    }

    fn round_response(&self) -> Response {
        match self.session.round() {
            None => Response::Err {
                error: describe(&ActionError::NotActive),
            },
            Some(r) => Response::Round {
                start: r.start,
                target: r.target,
                current: r.current,
                denary: r.current.to_denary(),
                steps: r.steps,
                solved: self.session.is_solved(),
            },
        }
    }

    fn handle_command(&mut self, cmd: &Command, rng: &mut dyn RngCore) -> Response {
        let result = match cmd {
            Command::Generate => {
                self.session.generate(rng);
                Ok(())
            }
            Command::Mode { mode } => self.session.select_mode(*mode),
            Command::Shift { direction } => self.session.shift(*direction).map(|_| ()),
            Command::Mask { mask } => self.session.submit_mask(mask).map(|_| ()),
            Command::State => Ok(()),
            Command::Solution => {
                return match self.session.solution() {
                    Some(sol) => Response::Solution {
                        classification: sol.classification,
                        messages: sol.messages(),
                    },
                    None => Response::Err {
                        error: "round not solved".to_owned(),
                    },
                }
            }
            Command::Apply {
                operation,
                byte,
                operand,
            } => {
                return match operation.with_operand(operand.as_deref()) {
                    Ok(op) => {
                        let out = byte.apply(op);
                        Response::Byte {
                            byte: out,
                            denary: out.to_denary(),
                        }
                    }
                    Err(e) => Response::Err {
                        error: e.to_string(),
                    },
                }
            }
            Command::Decode { byte } => {
                return Response::Byte {
                    byte: *byte,
                    denary: byte.to_denary(),
                }
            }
            Command::ValidateMask { mask } => {
                return Response::Valid {
                    valid: byte::validate_mask(mask),
                }
            }
            Command::Solve { start, target } => {
                let sol = solve::solve(*target, *start);
                return Response::Solution {
                    classification: sol.classification,
                    messages: sol.messages(),
                };
            }
            Command::Shutdown => return Response::Ok,
        };
        match result {
            Ok(()) => self.round_response(),
            Err(e) => Response::Err { error: describe(&e) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitgame::byte::notation;
    use bitgame::solve::Classification;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct Lines(RefCell<VecDeque<String>>);

    impl Readline for Lines {
        fn read_line(&self, buf: &mut String) -> io::Result<usize> {
            match self.0.borrow_mut().pop_front() {
                Some(l) => {
                    buf.push_str(&l);
                    buf.push('\n');
                    Ok(l.len() + 1)
                }
                None => Ok(0),
            }
        }
    }

    fn run(cmds: &[Command], prepare: impl FnOnce(&mut Session)) -> Vec<Response> {
        let opt = GlobalOptions {
            debug: 1,
            seed: None,
            no_color: true,
            git_sha: String::new(),
        };
        let lines = Lines(RefCell::new(
            cmds.iter()
                .map(|c| serde_json::to_string(c).unwrap())
                .collect(),
        ));
        let mut out: Vec<u8> = Vec::new();
        {
            let mut worker = Worker::new(&lines, &mut out, &opt);
            prepare(&mut worker.session);
            let mut rng = StdRng::seed_from_u64(11);
            worker.run(&mut rng).unwrap();
        }
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn b(s: &str) -> byte::Byte {
        notation::parse(s).unwrap()
    }

    #[test]
    fn test_session_commands() {
        use bitgame::game::Mode;
        let resps = run(
            &[
                Command::Mask {
                    mask: "1".to_owned(),
                },
                Command::Mode {
                    mode: Mode::AndMask,
                },
                Command::Mask {
                    mask: "1x".to_owned(),
                },
                Command::Mask {
                    mask: "10011000".to_owned(),
                },
                Command::Solution,
                Command::Shutdown,
                Command::State,
            ],
            |s| s.begin(b("11011010"), b("10011000")),
        );
        assert_eq!(resps.len(), 5);
        assert_eq!(
            resps[0],
            Response::Err {
                error: "operation does not match the selected mode".to_owned()
            }
        );
        match &resps[2] {
            Response::Err { error } => assert!(error.starts_with("invalid mask")),
            r => panic!("unexpected {:?}", r),
        }
        assert_eq!(
            resps[3],
            Response::Round {
                start: b("11011010"),
                target: b("10011000"),
                current: b("10011000"),
                denary: -104,
                steps: 1,
                solved: true,
            }
        );
        assert_eq!(
            resps[4],
            Response::Solution {
                classification: Classification::AndMask,
                messages: vec![
                    "AND mask with 10011000".to_owned(),
                    "11011010 ==> 10011000".to_owned(),
                ],
            }
        );
    }

    #[test]
    fn test_stateless_commands() {
        let resps = run(
            &[
                Command::Apply {
                    operation: byte::OpKind::LogicalShiftRight,
                    byte: b("10111000"),
                    operand: Some("2".to_owned()),
                },
                Command::Decode { byte: b("10000000") },
                Command::ValidateMask {
                    mask: "10a".to_owned(),
                },
                Command::Solve {
                    start: b("10111000"),
                    target: b("11100000"),
                },
                Command::Apply {
                    operation: byte::OpKind::OrMask,
                    byte: b("10111000"),
                    operand: None,
                },
            ],
            |_| (),
        );
        assert_eq!(
            resps[0],
            Response::Byte {
                byte: b("00101110"),
                denary: 46,
            }
        );
        assert_eq!(
            resps[1],
            Response::Byte {
                byte: b("10000000"),
                denary: -128,
            }
        );
        assert_eq!(resps[2], Response::Valid { valid: false });
        match &resps[3] {
            Response::Solution {
                classification,
                messages,
            } => {
                assert_eq!(*classification, Classification::TwoStep);
                assert_eq!(messages.len(), 4);
            }
            r => panic!("unexpected {:?}", r),
        }
        match &resps[4] {
            Response::Err { .. } => (),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_generate_and_bad_json() {
        let opt = GlobalOptions {
            debug: 1,
            seed: None,
            no_color: true,
            git_sha: String::new(),
        };
        let lines = Lines(RefCell::new(
            vec![
                r#"{"op":"state"}"#.to_owned(),
                "not json".to_owned(),
                r#"{"op":"generate"}"#.to_owned(),
            ]
            .into_iter()
            .collect(),
        ));
        let mut out: Vec<u8> = Vec::new();
        {
            let mut worker = Worker::new(&lines, &mut out, &opt);
            let mut rng = StdRng::seed_from_u64(5);
            worker.run(&mut rng).unwrap();
        }
        let resps: Vec<Response> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(resps.len(), 3);
        assert_eq!(
            resps[0],
            Response::Err {
                error: "no round in play".to_owned()
            }
        );
        match &resps[1] {
            Response::Err { error } => assert!(error.starts_with("bad command")),
            r => panic!("unexpected {:?}", r),
        }
        match &resps[2] {
            Response::Round {
                start,
                target,
                steps,
                solved,
                ..
            } => {
                assert_ne!(start, target);
                assert_eq!(*steps, 0);
                assert!(!solved);
            }
            r => panic!("unexpected {:?}", r),
        }
    }
}
