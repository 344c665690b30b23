use failure::Fail;
use std::fmt;

/// Launcher steps, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Usage,
    Size,
    Config,
    Device,
    Context,
    Queue,
    Load,
    Build,
    Lookup,
    Allocate,
    Bind,
    Transfer,
    Execute,
    Verify,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Step::Usage => "argument parsing",
            Step::Size => "size check",
            Step::Config => "configuration",
            Step::Device => "device resolution",
            Step::Context => "context creation",
            Step::Queue => "command queue creation",
            Step::Load => "kernel image loading",
            Step::Build => "program build",
            Step::Lookup => "kernel lookup",
            Step::Allocate => "buffer allocation",
            Step::Bind => "argument binding",
            Step::Transfer => "data transfer",
            Step::Execute => "kernel execution",
            Step::Verify => "verification",
        };
        write!(f, "{}", name)
    }
}

#[derive(Fail, Debug)]
pub enum LaunchError {
    #[fail(display = "Usage error: {}", comment)]
    UsageError { comment: String },

    #[fail(display = "Invalid size {}. Must be > 0 and <= {}", size, max)]
    InvalidSize { size: i64, max: i64 },

    #[fail(display = "Invalid configuration: {}, error: {}", comment, error)]
    ConfigError {
        comment: String,
        error: failure::Error,
    },

    #[fail(
        display = "No platform/device found (platform marker: {:?})",
        platform_marker
    )]
    NoDeviceFound { platform_marker: String },

    #[fail(display = "Failed to create context: {}, error: {}", comment, error)]
    ContextCreationError {
        comment: String,
        error: failure::Error,
    },

    #[fail(display = "Failed to create command queue: {}, error: {}", comment, error)]
    QueueCreationError {
        comment: String,
        error: failure::Error,
    },

    #[fail(display = "Failed to read kernel image: {}, error: {}", comment, error)]
    FileReadError {
        comment: String,
        error: failure::Error,
    },

    #[fail(display = "Failed to build program: {}, error: {}", comment, error)]
    ProgramBuildError {
        comment: String,
        error: failure::Error,
    },

    #[fail(display = "Failed to create kernel: {}, error: {}", comment, error)]
    KernelLookupError {
        comment: String,
        error: failure::Error,
    },

    #[fail(display = "Failed to allocate buffer: {}, error: {}", comment, error)]
    BufferAllocationError {
        comment: String,
        error: failure::Error,
    },

    #[fail(display = "Failed to bind argument: {}, error: {}", comment, error)]
    ArgumentBindError {
        comment: String,
        error: failure::Error,
    },

    #[fail(display = "Transfer failed: {}, error: {}", comment, error)]
    TransferError {
        comment: String,
        error: failure::Error,
    },

    #[fail(display = "Kernel execution failed: {}, error: {}", comment, error)]
    ExecutionError {
        comment: String,
        error: failure::Error,
    },

    #[fail(
        display = "TEST FAILED with {} mismatches (size={})",
        mismatches, size
    )]
    VerificationFailure { mismatches: usize, size: usize },
}

impl LaunchError {
    /// Wrap a lower-level error into the variant reported for `step`
    pub fn at(step: Step, comment: &str, error: failure::Error) -> Self {
        let comment = comment.to_owned();
        match step {
            Step::Usage => LaunchError::UsageError {
                comment: format!("{}: {}", comment, error),
            },
            Step::Size => LaunchError::UsageError {
                comment: format!("{}: {}", comment, error),
            },
            Step::Config => LaunchError::ConfigError { comment, error },
            Step::Device => LaunchError::NoDeviceFound {
                platform_marker: comment,
            },
            Step::Context => LaunchError::ContextCreationError { comment, error },
            Step::Queue => LaunchError::QueueCreationError { comment, error },
            Step::Load => LaunchError::FileReadError { comment, error },
            Step::Build => LaunchError::ProgramBuildError { comment, error },
            Step::Lookup => LaunchError::KernelLookupError { comment, error },
            Step::Allocate => LaunchError::BufferAllocationError { comment, error },
            Step::Bind => LaunchError::ArgumentBindError { comment, error },
            Step::Transfer => LaunchError::TransferError { comment, error },
            Step::Execute => LaunchError::ExecutionError { comment, error },
            Step::Verify => LaunchError::ExecutionError { comment, error },
        }
    }

    /// The step this error was raised in
    pub fn step(&self) -> Step {
        match self {
            LaunchError::UsageError { .. } => Step::Usage,
            LaunchError::InvalidSize { .. } => Step::Size,
            LaunchError::ConfigError { .. } => Step::Config,
            LaunchError::NoDeviceFound { .. } => Step::Device,
            LaunchError::ContextCreationError { .. } => Step::Context,
            LaunchError::QueueCreationError { .. } => Step::Queue,
            LaunchError::FileReadError { .. } => Step::Load,
            LaunchError::ProgramBuildError { .. } => Step::Build,
            LaunchError::KernelLookupError { .. } => Step::Lookup,
            LaunchError::BufferAllocationError { .. } => Step::Allocate,
            LaunchError::ArgumentBindError { .. } => Step::Bind,
            LaunchError::TransferError { .. } => Step::Transfer,
            LaunchError::ExecutionError { .. } => Step::Execute,
            LaunchError::VerificationFailure { .. } => Step::Verify,
        }
    }

    /// The run completed but produced wrong numbers
    pub fn is_verification_failure(&self) -> bool {
        match self {
            LaunchError::VerificationFailure { .. } => true,
            _ => false,
        }
    }
}

pub fn err_msg(step: Step, comment: &str) -> LaunchError {
    LaunchError::at(step, comment, failure::err_msg(comment.to_owned()))
}

pub type Result<T> = ::std::result::Result<T, LaunchError>;

pub trait Logging {
    type T;
    fn log(self, step: Step, comment: &str) -> Result<Self::T>;
}

impl<T, E: Into<failure::Error>> Logging for ::std::result::Result<T, E> {
    type T = T;

    fn log(self, step: Step, comment: &str) -> Result<Self::T> {
        self.map_err(|e| {
            let error = e.into();
            debug!("{} failed: {} ({})", step, comment, error);
            LaunchError::at(step, comment, error)
        })
    }
}
