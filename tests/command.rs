/*!
Defines a simple command snapshotting mechanism.

This took some inspiration from `insta-cmd`, but re-works a few things.
This defines a wrapper around `std::process::Command` that all of the
tests use instead. It's essentially the same builder with some helper
methods and, crucially, uses a owned builder instead of a mutable builder.
This makes it compose more nicely at the expense of allocs (which we do
not care about in tests).

I specifically wrote this in a way that it has no other dependencies on
other modules in this crate. That means it should be very easy to copy &
paste to other test suites.
*/

use std::{
    collections::BTreeMap,
    env::consts::EXE_SUFFIX,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process,
};

use bstr::{ByteSlice, ByteVec};

macro_rules! run_and_snapshot {
    ($cmd:expr, $body:expr) => {{
        let snap = $cmd.snapshot();
        let mut settings = insta::Settings::clone_current();
        settings.set_info(snap.info());
        settings.set_omit_expression(true);
        settings.bind(|| ($body)(snap.snapshot()));
    }};
}

macro_rules! assert_cmd_snapshot {
    ($spawnable:expr, @$snapshot:literal $(,)?) => {{
        $crate::command::run_and_snapshot!($spawnable, |snapshot: &str| {
            insta::assert_snapshot!(snapshot, @$snapshot);
        });
    }};
    ($name:expr, $spawnable:expr $(,)?) => {{
        $crate::command::run_and_snapshot!($spawnable, |snapshot: &str| {
            insta::assert_snapshot!($name, snapshot);
        });
    }};
    ($spawnable:expr $(,)?) => {{
        $crate::command::run_and_snapshot!($spawnable, |snapshot: &str| {
            insta::assert_snapshot!(snapshot);
        });
    }};
}

pub(crate) use {assert_cmd_snapshot, run_and_snapshot};

/// A snapshot generated from running a command.
///
/// This also comes with some contextual info that is shown in the `cargo
/// insta review` user interface, but is not actually included in the
/// snapshot.
pub struct Snapshot {
    /// The contextual info put into the `cargo insta review` user interface.
    info: CommandInfo,
    /// The actual snapshot contents.
    snapshot: String,
}

impl Snapshot {
    /// Creates a new snapshot from a wrapped command and the process output.
    fn new(cmd: &Command, output: &process::Output) -> Snapshot {
        let info = cmd.info();
        let snapshot = format!(
            "success: {:?}\n\
             exit_code: {}\n\
             ----- stdout -----\n\
             {}\n\
             ----- stderr -----\n\
             {}",
            output.status.success(),
            output.status.code().unwrap_or(!0),
            bytes_to_string(&output.stdout),
            bytes_to_string(&output.stderr),
        );
        Snapshot { info, snapshot }
    }

    /// Returns the Insta "info" that contextualizes the snapshot.
    pub fn info(&self) -> &CommandInfo {
        &self.info
    }

    /// Returns the snapshot derived from running the command.
    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }
}

/// An unfortunate wrapper around `std::process::Command`.
///
/// This basically exposes the same behavior API, except it returns
/// `Command` instead of `&mut Command`. This probably results in more
/// allocs in some cases, but we don't care. We're using this in tests. And
/// this is way more convenient.
///
/// Note that we really only wrap the command "builder" API. We don't wrap
/// the various output types like `Child` and `Output` and so on. (Thank
/// goodness.)
#[derive(Clone, Debug)]
pub struct Command {
    bin: OsString,
    args: Vec<OsString>,
    envs: Vec<EnvAction>,
}

impl Command {
    /// Create a new command wrapper for the given binary program.
    pub fn new(bin: impl AsRef<OsStr>) -> Command {
        Command { bin: bin.as_ref().to_os_string(), args: vec![], envs: vec![] }
    }

    /// Add an argument to the end of this command invocation.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Command {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add arguments to the end of this command invocation.
    pub fn args(
        mut self,
        args: impl IntoIterator<Item = impl AsRef<OsStr>>,
    ) -> Command {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Set an environment variable.
    pub fn env(
        mut self,
        key: impl AsRef<OsStr>,
        val: impl AsRef<OsStr>,
    ) -> Command {
        self.envs.push(EnvAction::Set(
            key.as_ref().to_os_string(),
            val.as_ref().to_os_string(),
        ));
        self
    }

    /// Remove an environment variable (also prevents inheriting from the
    /// parent process).
    #[expect(dead_code)]
    pub fn env_remove(mut self, key: impl AsRef<OsStr>) -> Command {
        self.envs.push(EnvAction::Remove(key.as_ref().to_os_string()));
        self
    }

    /// Turn this wrapper into a fresh `std::process::Command`.
    pub fn std(&self) -> process::Command {
        let mut cmd = process::Command::new(&self.bin);
        cmd.args(self.args.iter());
        for action in self.envs.iter() {
            match *action {
                EnvAction::Set(ref key, ref val) => {
                    cmd.env(key, val);
                }
                EnvAction::Remove(ref key) => {
                    cmd.env_remove(key);
                }
            }
        }
        // Keep the spawned binary's output deterministic regardless of the
        // environment the test suite itself was launched in. `cadence` prints
        // an anyhow backtrace when `RUST_BACKTRACE=1`, which would otherwise
        // leak into (and break) these stderr snapshots.
        cmd.env_remove("RUST_BACKTRACE");
        cmd.env_remove("RUST_LIB_BACKTRACE");
        cmd.stdin(process::Stdio::null());
        cmd
    }

    /// Runs this command and returns a snapshot based on its output.
    pub fn snapshot(&self) -> Snapshot {
        let output = self.std().output().unwrap();
        Snapshot::new(self, &output)
    }

    /// Returns the info for this command.
    pub fn info(&self) -> CommandInfo {
        // This is a little silly, but it means we only need to write the
        // `CommandInfo` constructor once for one universal type.
        CommandInfo::new(&self.std())
    }
}

/// An action to take on environment variables.
#[derive(Clone, Debug)]
enum EnvAction {
    /// Maps to `std::process::Command::env`.
    Set(OsString, OsString),
    /// Maps to `std::process::Command::env_remove`.
    Remove(OsString),
}

/// Information about a particular command.
///
/// This is fed into `insta` as contextual information that doesn't appear
/// directly in the snapshot, but instead in the `cargo insta review` user
/// interface.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CommandInfo {
    bin: String,
    args: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
}

impl CommandInfo {
    fn new(cmd: &process::Command) -> CommandInfo {
        let bin = {
            let path = Path::new(cmd.get_program())
                .file_name()
                .unwrap_or(OsStr::new("{UNKNOWN}"));
            let mut bin =
                <[u8]>::from_os_str(path).expect("valid UTF-8 on Windows");
            if bin.ends_with_str(EXE_SUFFIX) {
                bin = &bin[..bin.len() - EXE_SUFFIX.len()];
            }
            bin
        };
        CommandInfo {
            bin: bytes_to_string(&bin),
            args: cmd.get_args().map(os_str_to_string).collect(),
            env: cmd
                .get_envs()
                .map(|(k, v)| {
                    (
                        os_str_to_string(k),
                        os_str_to_string(v.unwrap_or(OsStr::new(""))),
                    )
                })
                .collect(),
        }
    }
}

/// Return a command prepared to execute the binary with the given name.
///
/// This may have more than just a binary name. For example, this tries to
/// detect `cross` and setup a runner for it.
pub fn bin(name: &str) -> Command {
    let bin = bin_path(name);
    match cross_runner() {
        None => Command::new(bin),
        Some(runner) => Command::new(runner).arg(bin),
    }
}

/// Returns a path to the Cargo project binary with the given name.
fn bin_path(name: &str) -> PathBuf {
    std::env::current_exe()
        .unwrap()
        .parent()
        .expect("executable's directory")
        .parent()
        .expect("target profile directory")
        .join(format!("{name}{}", EXE_SUFFIX))
}

fn cross_runner() -> Option<String> {
    let runner = std::env::var("CROSS_RUNNER").ok()?;
    if runner.is_empty() || runner == "empty" {
        return None;
    }
    if cfg!(target_arch = "powerpc64") {
        Some("qemu-ppc64".to_string())
    } else if cfg!(target_arch = "x86") {
        Some("i386".to_string())
    } else {
        // Make a guess... Sigh.
        Some(format!("qemu-{}", std::env::consts::ARCH))
    }
}

/// Turns a slice of bytes into a human readable string.
///
/// When the bytes are valid UTF-8, they are returned as-is. Otherwise, they
/// are escaped into valid UTF-8 using bstr's escaping mechanism.
fn bytes_to_string(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(string) => string.to_string(),
        Err(_) => bytes.escape_bytes().to_string(),
    }
}

/// Like `bytes_to_string`, but starts with an OS string.
///
/// On Windows, if `os_str` is not valid UTF-8, then lossy UTF-8 decoding is
/// done.
fn os_str_to_string(os_str: &OsStr) -> String {
    bytes_to_string(&Vec::from_os_str_lossy(os_str))
}
