pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process exit codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitCode {
    Ok,
}

impl ExitCode {
    pub const fn as_int(self) -> i32 {
        match self {
            Self::Ok => 0,
        }
    }
}

/// Fails to compile when `$ty` can't be copied into a GPU buffer
/// (its size must be a multiple of `wgpu::COPY_BUFFER_ALIGNMENT`).
#[macro_export]
macro_rules! assert_buffer_align {
    ($ty:ty) => {
        const _: () = assert!(
            ::core::mem::size_of::<$ty>() as u64 % ::wgpu::COPY_BUFFER_ALIGNMENT == 0,
            concat!(stringify!($ty), " is not aligned for GPU buffers"),
        );
    };
}
