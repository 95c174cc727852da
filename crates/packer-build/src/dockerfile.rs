use std::fmt;

/// A single Dockerfile instruction.
///
/// Each variant renders as its keyword followed by its operands, joined by
/// single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `FROM <image> [AS <alias>]`, which starts a new stage
    From { image: String, alias: Option<String> },
    /// `RUN <args...>`
    Run(Vec<String>),
    /// `WORKDIR <dir>`
    Workdir(String),
    /// `ADD <src> <dest>`
    Add { src: String, dest: String },
    /// `COPY <src> <dest>`
    Copy { src: String, dest: String },
    /// `COPY --from=<stage> <src> <dest>`
    CopyFrom {
        stage: String,
        src: String,
        dest: String,
    },
    /// `ENTRYPOINT <args...>`
    Entrypoint(Vec<String>),
}

impl Instruction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Instruction::From { .. } => "FROM",
            Instruction::Run(_) => "RUN",
            Instruction::Workdir(_) => "WORKDIR",
            Instruction::Add { .. } => "ADD",
            Instruction::Copy { .. } | Instruction::CopyFrom { .. } => "COPY",
            Instruction::Entrypoint(_) => "ENTRYPOINT",
        }
    }

    /// Operands in the order they are rendered.
    pub fn operands(&self) -> Vec<String> {
        match self {
            Instruction::From { image, alias } => {
                let mut ops = vec![image.clone()];
                if let Some(alias) = alias {
                    ops.push("AS".to_owned());
                    ops.push(alias.clone());
                }
                ops
            }
            Instruction::Run(args) | Instruction::Entrypoint(args) => args.clone(),
            Instruction::Workdir(dir) => vec![dir.clone()],
            Instruction::Add { src, dest } | Instruction::Copy { src, dest } => {
                vec![src.clone(), dest.clone()]
            }
            Instruction::CopyFrom { stage, src, dest } => {
                vec![format!("--from={stage}"), src.clone(), dest.clone()]
            }
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())?;
        for op in self.operands() {
            write!(f, " {op}")?;
        }
        Ok(())
    }
}

/// Read-only view of one build stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage<'a> {
    pub image: &'a str,
    pub alias: Option<&'a str>,
    /// Instructions after the stage's `FROM`
    pub instructions: &'a [Instruction],
}

/// An in-memory multi-stage Dockerfile.
///
/// Instructions are kept in insertion order and rendered one per line.
///
/// # Examples
///
/// ```
/// use packer_build::Dockerfile;
///
/// let mut d = Dockerfile::new();
/// d.from_as("python", "builder").workdir("/app");
/// d.from("python:3.9-slim").copy_from("builder", "/app", "/app");
///
/// assert_eq!(
///     d.render(),
///     "FROM python AS builder\nWORKDIR /app\nFROM python:3.9-slim\nCOPY --from=builder /app /app\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dockerfile {
    instructions: Vec<Instruction>,
}

impl Dockerfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn from(&mut self, image: impl Into<String>) -> &mut Self {
        self.push(Instruction::From {
            image: image.into(),
            alias: None,
        })
    }

    pub fn from_as(&mut self, image: impl Into<String>, alias: impl Into<String>) -> &mut Self {
        self.push(Instruction::From {
            image: image.into(),
            alias: Some(alias.into()),
        })
    }

    pub fn run<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Instruction::Run(args.into_iter().map(Into::into).collect()))
    }

    pub fn workdir(&mut self, dir: impl Into<String>) -> &mut Self {
        self.push(Instruction::Workdir(dir.into()))
    }

    pub fn add(&mut self, src: impl Into<String>, dest: impl Into<String>) -> &mut Self {
        self.push(Instruction::Add {
            src: src.into(),
            dest: dest.into(),
        })
    }

    pub fn copy(&mut self, src: impl Into<String>, dest: impl Into<String>) -> &mut Self {
        self.push(Instruction::Copy {
            src: src.into(),
            dest: dest.into(),
        })
    }

    pub fn copy_from(
        &mut self,
        stage: impl Into<String>,
        src: impl Into<String>,
        dest: impl Into<String>,
    ) -> &mut Self {
        self.push(Instruction::CopyFrom {
            stage: stage.into(),
            src: src.into(),
            dest: dest.into(),
        })
    }

    pub fn entrypoint<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Instruction::Entrypoint(
            args.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Split the instructions into stages, one per `FROM`.
    ///
    /// Instructions before the first `FROM` belong to no stage and are
    /// not reported.
    pub fn stages(&self) -> Vec<Stage<'_>> {
        let starts: Vec<usize> = self
            .instructions
            .iter()
            .enumerate()
            .filter(|(_, i)| matches!(i, Instruction::From { .. }))
            .map(|(idx, _)| idx)
            .collect();

        starts
            .iter()
            .enumerate()
            .filter_map(|(n, &start)| {
                let end = starts.get(n + 1).map_or(self.instructions.len(), |&next| next);
                match &self.instructions[start] {
                    Instruction::From { image, alias } => Some(Stage {
                        image,
                        alias: alias.as_deref(),
                        instructions: &self.instructions[start + 1..end],
                    }),
                    _ => None,
                }
            })
            .collect()
    }

    /// Render to Dockerfile text, one instruction per line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Dockerfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dockerfile_renders_empty() {
        assert_eq!(Dockerfile::new().render(), "");
    }

    #[test]
    fn instructions_render_as_space_joined_tokens() {
        let cases = [
            (
                Instruction::Run(vec!["pip".into(), "install".into(), "pipreqs".into()]),
                "RUN pip install pipreqs",
            ),
            (Instruction::Workdir("/app".into()), "WORKDIR /app"),
            (
                Instruction::Add {
                    src: ".".into(),
                    dest: ".".into(),
                },
                "ADD . .",
            ),
            (
                Instruction::Copy {
                    src: "a".into(),
                    dest: "b".into(),
                },
                "COPY a b",
            ),
            (
                Instruction::CopyFrom {
                    stage: "builder".into(),
                    src: "/app".into(),
                    dest: "/app".into(),
                },
                "COPY --from=builder /app /app",
            ),
            (
                Instruction::Entrypoint(vec!["python".into(), "/app".into()]),
                "ENTRYPOINT python /app",
            ),
            (
                Instruction::From {
                    image: "python".into(),
                    alias: Some("builder".into()),
                },
                "FROM python AS builder",
            ),
            (
                Instruction::From {
                    image: "alpine".into(),
                    alias: None,
                },
                "FROM alpine",
            ),
        ];

        for (instruction, expected) in cases {
            assert_eq!(instruction.to_string(), expected);
        }
    }

    #[test]
    fn render_keeps_insertion_order() {
        let mut d = Dockerfile::new();
        d.from("alpine").run(["echo", "one"]).run(["echo", "two"]);

        assert_eq!(d.render(), "FROM alpine\nRUN echo one\nRUN echo two\n");
    }

    #[test]
    fn stages_split_on_from() {
        let mut d = Dockerfile::new();
        d.from_as("python", "builder").workdir("/app").add(".", ".");
        d.from("alpine").copy_from("builder", "/app", "/app");

        let stages = d.stages();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].image, "python");
        assert_eq!(stages[0].alias, Some("builder"));
        assert_eq!(stages[0].instructions.len(), 2);
        assert_eq!(stages[1].image, "alpine");
        assert_eq!(stages[1].alias, None);
        assert_eq!(stages[1].instructions.len(), 1);
    }

    #[test]
    fn instructions_before_first_from_belong_to_no_stage() {
        let mut d = Dockerfile::new();
        d.workdir("/orphan").from("alpine");

        let stages = d.stages();
        assert_eq!(stages.len(), 1);
        assert!(stages[0].instructions.is_empty());
        assert_eq!(d.instructions().len(), 2);
    }
}
