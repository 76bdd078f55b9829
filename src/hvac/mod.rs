// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Lado HVAC del modelo (C6, §4.6): topología de airloops y equipos de zona,
//! grafo de nodos, dimensionado y controladores/economizador/DCV/ERV.
//!
//! `graph` contiene los tipos de datos (`HvacModel`, `AirLoop`, `NodeGraph`)
//! que el resto de submódulos construyen y validan; `topology` decide qué
//! forma de sistema corresponde a cada `HvacType` y construye el grafo;
//! `sizing` calcula cargas y caudales por zona; `controllers` añade
//! economizador, ventilación controlada por demanda, recuperación de calor
//! (ERV) y control de luz natural donde el clima y el tipo de edificio lo
//! justifiquen.

pub mod controllers;
pub mod graph;
pub mod sizing;
pub mod topology;

pub use graph::HvacModel;
