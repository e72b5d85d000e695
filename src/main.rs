// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use proteinscape::errors::ProteinScapeError;

fn main() -> Result<(), ProteinScapeError> {
    proteinscape::run()
}
