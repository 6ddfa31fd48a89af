// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod coordinator;
mod identifiers;
mod types;

use crate::{Lab, LabScope, RollRange};

pub fn create_test_lab(id: i64, name: &str, scope: LabScope, start: u32, end: u32) -> Lab {
    let mut lab: Lab = Lab::new(
        format!("LAB_TEST_{id}"),
        String::from(name),
        scope,
        RollRange::new(start, end).unwrap(),
    );
    lab.id = Some(id);
    lab
}
