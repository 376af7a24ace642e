use std::path::{Path, PathBuf};

use conda_tools::Hook;
use structopt::StructOpt;

pub struct TestApp {
    tmp_dir: tempdir::TempDir,
    active_env: Option<String>,
}

///
/// A fake conda installation designed for testing
///
/// Contains a base environment in `miniconda3/`, two named
/// environments (`envA` and `envB`), and a `conda` script printing
/// a canned `conda list` output.
impl TestApp {
    pub fn new() -> Self {
        let tmp_dir = tempdir::TempDir::new("test-conda-tools").unwrap();
        let test_app = TestApp {
            tmp_dir,
            active_env: Some("envA".to_string()),
        };
        for name in &["envA", "envB"] {
            std::fs::create_dir_all(test_app.env_prefix(name)).unwrap();
        }
        test_app.write_fake_conda("numpy 1.5 py37_0\nscipy 1.2.1 py37h7c811a0_0 conda-forge");
        test_app
    }

    pub fn path(&self) -> PathBuf {
        self.tmp_dir.path().to_path_buf()
    }

    pub fn base_prefix(&self) -> PathBuf {
        self.path().join("miniconda3")
    }

    pub fn env_prefix(&self, name: &str) -> PathBuf {
        self.base_prefix().join("envs").join(name)
    }

    pub fn activate(&mut self, name: Option<&str>) {
        self.active_env = name.map(|x| x.to_string());
    }

    pub fn conda_path(&self) -> PathBuf {
        self.path().join("bin").join("conda")
    }

    /// Write a `conda` script which prints `rows` when called with `list`
    pub fn write_fake_conda(&self, rows: &str) {
        let script = format!(
            "#!/bin/sh\necho \"# packages in environment at $3:\"\necho \"#\"\necho \"{}\"\n",
            rows.replace('\n', "\"\necho \"")
        );
        self.write_script(&script);
    }

    pub fn write_failing_conda(&self) {
        self.write_script("#!/bin/sh\necho \"EnvironmentLocationNotFound: $3\" >&2\nexit 1\n");
    }

    #[cfg(unix)]
    fn write_script(&self, script: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = self.conda_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(not(unix))]
    fn write_script(&self, _script: &str) {}

    pub fn settings(&self) -> conda_tools::Settings {
        let conda_prefix = match &self.active_env {
            Some(name) if name == "base" => Some(self.base_prefix()),
            Some(name) => Some(self.env_prefix(name)),
            None => None,
        };
        conda_tools::Settings {
            conda_prefix,
            conda_exe: Some(self.conda_path()),
            ..Default::default()
        }
    }

    pub fn run(&self, args: Vec<String>) -> Result<(), conda_tools::Error> {
        let mut cmd = vec!["conda-tools".to_string()];
        cmd.extend(args);
        let cmd = conda_tools::Command::from_iter_safe(cmd).unwrap();
        conda_tools::run(cmd, self.settings())
    }

    pub fn assert_run_ok(&self, args: &[&str]) {
        let args = to_string_args(&args);
        self.run(args).unwrap();
    }

    pub fn assert_run_error(&self, args: &[&str]) -> conda_tools::Error {
        let args = to_string_args(&args);
        let res = self.run(args);
        res.unwrap_err()
    }

    pub fn write_env_vars(&self, prefix: &Path, hook: Hook, contents: &str) {
        let path = conda_tools::env_vars_path(prefix, hook);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    pub fn read_env_vars(&self, prefix: &Path, hook: Hook) -> String {
        let path = conda_tools::env_vars_path(prefix, hook);
        std::fs::read_to_string(path).unwrap()
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, &contents).unwrap();
        path
    }
}

pub fn to_string_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|x| x.to_string()).collect()
}
