// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

mod mock;

pub use mock::*;
