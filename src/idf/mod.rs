// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Modelo de objetos IDF y emisor (C1, §4.1).
//!
//! `objects` expone el conjunto cerrado de variantes de objeto IDF que usa el
//! generador, cada una con su lista de campos fijada en orden IDD en tiempo
//! de compilación. `emit` serializa una secuencia de objetos al formato de
//! texto posicional exacto que exige EnergyPlus 24.2.

pub mod emit;
pub mod lower;
pub mod objects;

pub use objects::IdfObject;
