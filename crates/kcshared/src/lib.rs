//! Shared types for the kernel selector and its collaborators.

/// Interpreter descriptors and versions
pub mod interpreter;

/// Kernel specs, as found on disk or reported by a server
pub mod kernel_spec;

/// Running kernels and the sessions that own them
pub mod live_kernel;

/// The kernel-related parts of notebook metadata
pub mod notebook_metadata;
