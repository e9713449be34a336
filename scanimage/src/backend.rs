use crate::{
    device::{Device, DEVICE_LIST_FORMAT},
    result::{Result, ScanimageError},
};
use std::{
    ffi::OsStr,
    fmt::Debug,
    io::{self, Read},
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

pub const DEFAULT_PROGRAM: &str = "scanimage";

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Handle to the scanning utility. Every call spawns a fresh process.
#[derive(Clone)]
pub struct Backend {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Backend {
    /// Create a backend that waits for the utility without a time limit.
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Kill the utility and fail if it runs longer than `timeout`. `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Enumerate attached devices.
    ///
    /// Any failure of the utility is logged and reported as an empty list.
    pub fn list_devices(&self) -> Vec<Device> {
        let list_arg = format!("--formatted-device-list={DEVICE_LIST_FORMAT}");

        match self.run([list_arg.as_str()]) {
            Ok(output) => {
                let devices = Device::parse_list(&output);
                log::debug!("Found {} device(s)", devices.len());
                devices
            }
            Err(err) => {
                log::warn!("Failed to enumerate devices: {err}");
                Vec::new()
            }
        }
    }

    /// Run a scan with prepared arguments and return the image bytes from stdout.
    pub fn scan<I, S>(&self, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let image = self.run(args)?;
        log::debug!("Received {} bytes of image data", image.len());
        Ok(image)
    }

    fn run<I, S>(&self, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::trace!("Spawn {command:?}");

        let mut child = command.spawn().map_err(|source| ScanimageError::Launch {
            program: self.program.display().to_string(),
            source,
        })?;

        let stdout = child.stdout.take().expect("stdout should be piped");
        let stderr = child.stderr.take().expect("stderr should be piped");

        let stdout_reader = drain("stdout", stdout)?;
        let stderr_reader = drain("stderr", stderr)?;

        let status = match self.timeout {
            Some(timeout) => wait_with_timeout(&mut child, timeout)?,
            None => child.wait()?,
        };

        log::trace!("Process finished with {status}");

        let stdout = join(stdout_reader)?;
        let stderr = join(stderr_reader)?;

        if status.success() {
            return Ok(stdout);
        }

        if status.code().is_none() {
            return Err(ScanimageError::Terminated);
        }

        Err(ScanimageError::Failed {
            status,
            stderr: String::from_utf8_lossy(&stderr).trim().to_owned(),
        })
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("program", &self.program)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Read a child pipe to the end on a separate thread, so the child never blocks on a full pipe.
fn drain<R>(name: &str, mut pipe: R) -> io::Result<JoinHandle<io::Result<Vec<u8>>>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name(format!("scanimage-{name}"))
        .spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
}

fn join(reader: JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    reader
        .join()
        .map_err(|_| io::Error::other("pipe reader thread panicked"))?
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if Instant::now() >= deadline {
            log::debug!("Process {} timed out after {timeout:?}, kill it", child.id());
            // The process may exit between try_wait and kill.
            _ = child.kill();
            _ = child.wait();
            return Err(ScanimageError::Timeout(timeout));
        }

        thread::sleep(POLL_INTERVAL);
    }
}
