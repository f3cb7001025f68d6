use assert_cmd::Command;
use gyp_shim::FALLBACKS_VAR;
use std::{
    env::consts::EXE_SUFFIX,
    fs::{copy, create_dir, read_to_string, write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, Once, PoisonError},
};
use tempfile::{TempDir, tempdir};

static BUILD_FAKE_PYTHON: Once = Once::new();

// Copying an executable while another thread spawns a child can make the copy briefly
// unexecutable ("text file busy"), so installations are used one at a time.
static LOCK: Mutex<()> = Mutex::new(());

/// A shim installed as `<tempdir>/bin/gyp` with its script at `<tempdir>/gyp_main.py`, plus a
/// `<tempdir>/fakebin` directory of fake interpreters that serves as `PATH`.
pub struct Installation {
    tempdir: TempDir,
    _guard: MutexGuard<'static, ()>,
}

impl Installation {
    pub fn new(script: &str) -> Self {
        let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let tempdir = tempdir().unwrap();
        create_dir(tempdir.path().join("bin")).unwrap();
        create_dir(tempdir.path().join("fakebin")).unwrap();
        copy(env!("CARGO_BIN_EXE_gyp"), tempdir.path().join("bin").join(exe("gyp"))).unwrap();
        let installation = Self {
            tempdir,
            _guard: guard,
        };
        installation.set_script(script);
        installation
    }

    pub fn root(&self) -> &Path {
        self.tempdir.path()
    }

    pub fn gyp(&self) -> PathBuf {
        self.root().join("bin").join(exe("gyp"))
    }

    pub fn fakebin(&self) -> PathBuf {
        self.root().join("fakebin")
    }

    pub fn set_script(&self, script: &str) {
        write(self.root().join("gyp_main.py"), script).unwrap();
    }

    /// Installs a fake interpreter as `dir/name`. `version` is what it reports for
    /// `--version`.
    pub fn add_interpreter_in(&self, dir: &Path, name: &str, version: Option<&str>) -> PathBuf {
        let path = dir.join(exe(name));
        copy(fake_python(), &path).unwrap();
        if let Some(version) = version {
            write(path.with_extension("version"), version).unwrap();
        }
        path
    }

    pub fn add_interpreter(&self, name: &str, version: Option<&str>) -> PathBuf {
        self.add_interpreter_in(&self.fakebin(), name, version)
    }

    /// The shim, with `PATH` limited to `fakebin`, no `PYTHON` override, and no fallbacks
    /// outside the installation.
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.gyp());
        command.env("PATH", self.fakebin());
        command.env(FALLBACKS_VAR, "");
        command.env("FAKE_PYTHON_LOG", self.log_path());
        command.env_remove("PYTHON");
        command.env_remove("RUST_LOG");
        command
    }

    pub fn log_path(&self) -> PathBuf {
        self.root().join("fake_python.log")
    }

    /// One entry per fake interpreter invocation: its name followed by its arguments.
    pub fn invocations(&self) -> Vec<Vec<String>> {
        let Ok(contents) = read_to_string(self.log_path()) else {
            return Vec::new();
        };
        contents
            .lines()
            .map(|line| line.split(' ').map(ToOwned::to_owned).collect())
            .collect()
    }
}

fn fake_python() -> PathBuf {
    BUILD_FAKE_PYTHON.call_once(|| {
        let mut command = std::process::Command::new(env!("CARGO"));
        command.args(["build", "--package", "fake-python"]);
        let status = command.status().unwrap();
        assert!(status.success());
    });
    Path::new(env!("CARGO_BIN_EXE_gyp")).with_file_name(exe("fake-python"))
}

fn exe(name: &str) -> String {
    format!("{name}{EXE_SUFFIX}")
}
