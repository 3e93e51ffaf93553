// Copyright (c) 2025 Bolsillo contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod income;
pub mod settings;
pub mod expenses;
pub mod loans;
pub mod credits;
pub mod wishlist;
pub mod dashboard;
pub mod exporter;
pub mod doctor;
