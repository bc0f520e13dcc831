// Copyright © holoclash 2024-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

pub mod outcome;
pub mod with_error;

/// Returns an error from the current function.
///
/// The error is wrapped in [outcome::StopCondition::Error] so it can be
/// propagated through engine code returning [outcome::Outcome].
#[macro_export]
macro_rules! fail {
    ($($arg:tt)*) => {
        return Err($crate::outcome::StopCondition::Error(
            ::color_eyre::eyre::eyre!($($arg)*),
        ))
    };
}

/// Verifies that a condition holds, returning an error otherwise.
#[macro_export]
macro_rules! verify {
    ($expr:expr) => {
        if !$expr {
            $crate::fail!("Verification failed: {}", stringify!($expr));
        }
    };
    ($expr:expr, $($arg:tt)*) => {
        if !$expr {
            $crate::fail!($($arg)*);
        }
    };
}
