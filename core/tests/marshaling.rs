use std::sync::LazyLock;

use v8_args_core::{
    CheckError, Checker, Command, Encode, EncodeError, FieldDescriptor, Invocation, OptionRecord,
    Schema, Value, Violation, ViolationKind, assemble, relocate_to_end, values,
};

#[derive(Debug, Clone, Copy)]
enum Level {
    Low,
    High,
    /// Has no external token.
    Unset,
}

impl Encode for Level {
    fn encode(&self) -> Result<String, EncodeError> {
        match self {
            Level::Low => Ok("low".to_string()),
            Level::High => Ok("high".to_string()),
            Level::Unset => Err(EncodeError::new("Level", "no token for Unset")),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Target {
    path: String,
    user: String,
    password: String,
    extension: String,
}

impl OptionRecord for Target {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Target>> = LazyLock::new(|| {
            Schema::<Target>::builder()
                .field(FieldDescriptor::scalar("path", "/PathFlag"), |t| {
                    Value::from(&t.path)
                })
                .field(
                    FieldDescriptor::scalar("user", "/UserFlag").with_default("guest"),
                    |t| Value::from(&t.user),
                )
                .field(
                    FieldDescriptor::scalar("password", "/PasswordFlag").optional(),
                    |t| Value::from(&t.password),
                )
                .field(
                    FieldDescriptor::scalar("extension", "-Extension").optional(),
                    |t| Value::from(&t.extension),
                )
                .build()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, Default)]
struct Job {
    verbose: bool,
    target: Target,
    level: Option<Level>,
    required_level: Option<Level>,
    report: String,
    force: bool,
    fast: bool,
}

impl OptionRecord for Job {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Job>> = LazyLock::new(|| {
            Schema::<Job>::builder()
                .field(FieldDescriptor::presence("verbose", "/Verbose"), |j| {
                    j.verbose.into()
                })
                .embed("target", |j: &Job| &j.target)
                .field(FieldDescriptor::encoded("level", "-Level").optional(), |j| {
                    Value::encode_opt(j.level.as_ref())
                })
                .field(
                    FieldDescriptor::encoded("required_level", "-Required").with_default("low"),
                    |j| Value::encode_opt(j.required_level.as_ref()),
                )
                .marker("/RunJob")
                .field(FieldDescriptor::positional("report").optional(), |j| {
                    Value::from(&j.report)
                })
                .field(FieldDescriptor::presence("force", "-force"), |j| j.force.into())
                .field(FieldDescriptor::presence("fast", "-fast"), |j| j.fast.into())
                .relocate_to_end("-Extension")
                .build()
        });
        &SCHEMA
    }
}

impl Command for Job {
    fn command(&self) -> &str {
        "RUNNER"
    }

    fn check(&self) -> Result<(), CheckError> {
        let mut checker = Checker::for_record(self);
        checker.ensure(!self.fast || !self.force, || {
            Violation::check("fast and force are exclusive").with_context("fast", "set with force")
        });
        checker.ensure(!self.fast || self.level.is_some(), || {
            Violation::check("fast requires a level").with_context("level", "not set")
        });
        checker.finish()
    }

    fn values(&self) -> Vec<String> {
        values(self)
    }
}

fn target() -> Target {
    Target {
        path: "./repo".into(),
        user: "admin".into(),
        password: "pwd".into(),
        extension: String::new(),
    }
}

fn job() -> Job {
    Job {
        target: target(),
        ..Job::default()
    }
}

#[test]
fn target_renders_three_tokens_without_extension() {
    assert_eq!(
        values(&target()),
        ["/PathFlag ./repo", "/UserFlag admin", "/PasswordFlag pwd"]
    );

    let with_ext = Target {
        extension: "ext1".into(),
        ..target()
    };
    assert_eq!(
        values(&with_ext),
        [
            "/PathFlag ./repo",
            "/UserFlag admin",
            "/PasswordFlag pwd",
            "-Extension ext1"
        ]
    );
}

#[test]
fn marker_first_and_embedded_fields_in_place() {
    let job = Job {
        verbose: true,
        level: Some(Level::High),
        report: "out.txt".into(),
        force: true,
        ..job()
    };
    assert_eq!(
        job.values(),
        [
            "/RunJob",
            "/Verbose",
            "/PathFlag ./repo",
            "/UserFlag admin",
            "/PasswordFlag pwd",
            "-Level high",
            "-Required low",
            "out.txt",
            "-force",
        ]
    );
}

#[test]
fn extension_is_relocated_last_without_reordering_the_rest() {
    let plain = job();
    let extended = Job {
        target: Target {
            extension: "ext1".into(),
            ..target()
        },
        ..job()
    };

    let raw = assemble(&extended).tokens;
    assert_eq!(raw[4], "-Extension ext1");

    let fixed = extended.values();
    assert_eq!(fixed.last().map(String::as_str), Some("-Extension ext1"));
    assert_eq!(&fixed[..fixed.len() - 1], plain.values().as_slice());
}

#[test]
fn presence_flags_never_carry_values() {
    for force in [false, true] {
        let job = Job { force, ..job() };
        let tokens: Vec<_> = job
            .values()
            .into_iter()
            .filter(|t| t.starts_with("-force"))
            .collect();
        if force {
            assert_eq!(tokens, ["-force"]);
        } else {
            assert!(tokens.is_empty());
        }
    }
}

#[test]
fn optional_encode_failure_is_dropped_required_is_reported() {
    let optional = Job {
        level: Some(Level::Unset),
        ..job()
    };
    assert!(!optional.values().iter().any(|t| t.starts_with("-Level")));
    assert!(optional.check().is_ok());

    let required = Job {
        required_level: Some(Level::Unset),
        ..job()
    };
    assert!(!required.values().iter().any(|t| t.starts_with("-Required")));
    let err = required.check().unwrap_err();
    assert_eq!(err.violations()[0].kind, ViolationKind::Encode);
}

#[test]
fn check_reports_every_failed_rule() {
    let job = Job {
        fast: true,
        force: true,
        ..Job::default()
    };
    let err = job.check().unwrap_err();
    let kinds: Vec<_> = err.violations().iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        [
            ViolationKind::MissingRequired,
            ViolationKind::Check,
            ViolationKind::Check
        ]
    );
    assert!(err.to_string().starts_with("3 checks failed: "));
    assert!(Invocation::new(&job).is_err());
}

#[test]
fn values_are_repeatable() {
    let job = Job {
        level: Some(Level::Low),
        fast: true,
        ..job()
    };
    let first = job.values();
    for _ in 0..3 {
        assert_eq!(job.values(), first);
    }
    assert!(job.check().is_ok());
}

#[test]
fn fixup_moves_only_the_prefixed_token() {
    let tokens: Vec<String> = ["/A", "-Extension x", "/B", "/C"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(
        relocate_to_end(tokens, &["-Extension"]),
        ["/A", "/B", "/C", "-Extension x"]
    );
}
