// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Tipos de datos del lado HVAC: el grafo de nodos de aire y la máquina de
//! estados de cada airloop (§4.6, §8 invariante 3 "every node name used as
//! an inlet appears exactly once as an outlet of some other component and
//! vice versa").

use std::collections::HashMap;

use crate::common::HvacType;
use crate::error::TopologyError;

/// Estados de construcción de un `AirLoopHVAC`, estrictamente secuenciales
/// (§4.6 "one-way state machine, no re-entry"): una vez que un airloop
/// avanza, no puede retroceder ni saltarse un estado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AirLoopState {
    Unallocated,
    ComponentsCreated,
    NodesWired,
    ControllersAttached,
    ZonesConnected,
    Validated,
}

impl AirLoopState {
    fn next(self) -> Option<AirLoopState> {
        match self {
            AirLoopState::Unallocated => Some(AirLoopState::ComponentsCreated),
            AirLoopState::ComponentsCreated => Some(AirLoopState::NodesWired),
            AirLoopState::NodesWired => Some(AirLoopState::ControllersAttached),
            AirLoopState::ControllersAttached => Some(AirLoopState::ZonesConnected),
            AirLoopState::ZonesConnected => Some(AirLoopState::Validated),
            AirLoopState::Validated => None,
        }
    }
}

/// Bucle de aire con ventilador(es), baterías y una o varias zonas
/// servidas por cajas de caudal (§4.6). Cubre Vav/Rtu/ChilledWater.
#[derive(Debug, Clone)]
pub struct AirLoop {
    pub name: String,
    pub state: AirLoopState,
    pub zones: Vec<String>,
    /// Tipo de sistema que decidió esta topología (Vav/Rtu/ChilledWater):
    /// determina, entre otras cosas, si las cajas de zona llevan recalentador
    /// (`idf::lower` necesita saberlo sin tener que volver a decidir el tipo).
    pub hvac_type: HvacType,
    pub has_economizer: bool,
    pub has_dcv: bool,
    pub has_erv: bool,
    pub has_daylighting: bool,
}

impl AirLoop {
    pub fn new(name: impl Into<String>, hvac_type: HvacType) -> Self {
        AirLoop {
            name: name.into(),
            state: AirLoopState::Unallocated,
            zones: Vec::new(),
            hvac_type,
            has_economizer: false,
            has_dcv: false,
            has_erv: false,
            has_daylighting: false,
        }
    }

    /// Avanza estrictamente al siguiente estado; error si `to` no es el
    /// sucesor inmediato del estado actual (ni una repetición, ni un salto).
    pub fn advance(&mut self, to: AirLoopState) -> Result<(), TopologyError> {
        match self.state.next() {
            Some(expected) if expected == to => {
                self.state = to;
                Ok(())
            }
            _ => Err(TopologyError::InvalidStateTransition {
                airloop: self.name.clone(),
                state: format!("{:?} -> {:?}", self.state, to),
            }),
        }
    }
}

/// Tipo de equipo de zona sin airloop (§4.6: Ptac/HeatPump no llevan grafo
/// de nodos propio; IdealLoads tampoco lleva controladores).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneHvacKind {
    Ptac,
    HeatPump,
    IdealLoads,
}

/// Un equipo de zona autónomo: PTAC, bomba de calor o cargas ideales.
#[derive(Debug, Clone)]
pub struct ZoneEquipmentUnit {
    pub zone: String,
    pub kind: ZoneHvacKind,
    pub name: String,
}

/// Contador de usos de un nombre de nodo de aire.
#[derive(Debug, Clone, Default)]
struct NodeUsage {
    outlet_count: u32,
    inlet_count: u32,
}

/// Grafo de adyacencia de nodos de aire de todo el modelo (§4.6, §8
/// invariante 3). No almacena la topología en sí (eso vive en `AirLoop` y en
/// la lista de ramas del IDF); solo cuenta cuántas veces aparece cada
/// nombre de nodo como entrada o como salida.
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    nodes: HashMap<String, NodeUsage>,
    /// Nodos exentos de la comprobación de emparejamiento: extremos del
    /// sistema (toma de aire exterior, nodo de aire de zona) que por diseño
    /// solo se usan en un sentido.
    terminal: std::collections::HashSet<String>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_terminal(&mut self, node: impl Into<String>) {
        self.terminal.insert(node.into());
    }

    pub fn register_outlet(&mut self, node: impl Into<String>) {
        self.nodes.entry(node.into()).or_default().outlet_count += 1;
    }

    pub fn register_inlet(&mut self, node: impl Into<String>) {
        self.nodes.entry(node.into()).or_default().inlet_count += 1;
    }

    /// Comprueba que todo nodo no terminal tenga exactamente una salida y
    /// una entrada que lo produzcan y lo consuman (§8 invariante 3).
    pub fn validate(&self) -> Vec<TopologyError> {
        let mut errors = Vec::new();
        for (name, usage) in &self.nodes {
            if self.terminal.contains(name) {
                continue;
            }
            if usage.outlet_count == 0 || usage.inlet_count == 0 {
                errors.push(TopologyError::DanglingNode { name: name.clone() });
            } else if usage.outlet_count > 1 {
                errors.push(TopologyError::DuplicateOutlet { name: name.clone() });
            }
        }
        errors
    }
}

/// Lado HVAC completo del modelo (§3, §4.6): los airloops con caja de
/// caudal, los equipos de zona sin airloop, y el grafo de nodos compartido
/// que permite validar todo el sistema de aire de una vez.
#[derive(Debug, Clone, Default)]
pub struct HvacModel {
    pub airloops: Vec<AirLoop>,
    pub zone_equipment: Vec<ZoneEquipmentUnit>,
    pub graph: NodeGraph,
}

impl HvacModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Todas las zonas servidas, por airloop o por equipo autónomo.
    pub fn is_zone_served(&self, zone: &str) -> bool {
        self.airloops.iter().any(|a| a.zones.iter().any(|z| z == zone))
            || self.zone_equipment.iter().any(|u| u.zone == zone)
    }

    pub fn validate_nodes(&self) -> Vec<TopologyError> {
        self.graph.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airloop_state_machine_rejects_skipped_state() {
        let mut loop_ = AirLoop::new("AL1", HvacType::Vav);
        assert!(loop_.advance(AirLoopState::ComponentsCreated).is_ok());
        assert!(loop_.advance(AirLoopState::ControllersAttached).is_err());
    }

    #[test]
    fn airloop_state_machine_rejects_reentry() {
        let mut loop_ = AirLoop::new("AL1", HvacType::Vav);
        loop_.advance(AirLoopState::ComponentsCreated).unwrap();
        assert!(loop_.advance(AirLoopState::ComponentsCreated).is_err());
    }

    #[test]
    fn node_graph_flags_dangling_node() {
        let mut graph = NodeGraph::new();
        graph.register_outlet("N1");
        let errors = graph.validate();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], TopologyError::DanglingNode { .. }));
    }

    #[test]
    fn node_graph_ignores_terminal_nodes() {
        let mut graph = NodeGraph::new();
        graph.mark_terminal("OA_Node");
        graph.register_inlet("OA_Node");
        assert!(graph.validate().is_empty());
    }

    #[test]
    fn node_graph_flags_duplicate_outlet() {
        let mut graph = NodeGraph::new();
        graph.register_outlet("N1");
        graph.register_outlet("N1");
        graph.register_inlet("N1");
        let errors = graph.validate();
        assert!(matches!(errors[0], TopologyError::DuplicateOutlet { .. }));
    }
}
