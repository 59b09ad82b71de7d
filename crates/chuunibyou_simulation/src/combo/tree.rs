//! Action tree: arena combo шагов с synthetic пустым root узлом.
//!
//! Узлы живут в `Vec` внутри дерева и ссылаются друг на друга через
//! [`NodeId`]. Owning рёбра только successor слоты; `prev` и `owner`
//! просто идентификаторы для диагностики.

use bevy::prelude::*;

use super::action_type::{format_path, ActionType};
use super::actions::{ActionCue, ComboAction, ComboStep};

/// Позиция узла в arena дерева
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Synthetic начальный узел, с которого стартует любое дерево
    pub const ROOT: NodeId = NodeId(0);

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

/// Нарушения контракта регистрации (build-time, не runtime).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("cannot register combo with no actions")]
    EmptyPath,

    #[error("combo ({path}) is not registered, please register it before continuing")]
    MissingPrefix { path: String },

    #[error("combo ({path}) already exists: {existing}")]
    DuplicateCombo { path: String, existing: String },
}

// ============================================================================
// Action Node
// ============================================================================

/// Один combo шаг: поведение, флаг завершения и исходящие рёбра.
#[derive(Debug, Clone)]
pub struct ActionNode {
    action: ComboAction,
    is_done: bool,
    next: [Option<NodeId>; ActionType::COUNT],
    prev: Option<NodeId>,
    /// Input, ведущий из `prev` в этот узел (None у root)
    via: Option<ActionType>,
    /// Entity, чей `ComboManager` владеет деревом
    owner: Option<Entity>,
}

impl ActionNode {
    fn new(action: ComboAction) -> Self {
        Self {
            action,
            is_done: false,
            next: [None; ActionType::COUNT],
            prev: None,
            via: None,
            owner: None,
        }
    }

    /// Перевзвести шаг: сбросить завершение, затем begin hook варианта.
    pub fn begin(&mut self, cues: &mut Vec<ActionCue>) {
        self.is_done = false;
        self.action.on_begin(cues);
    }

    /// Один fixed tick шага
    pub fn tick(&mut self, delta: f32) {
        if !self.is_done && self.action.on_tick(delta) {
            self.is_done = true;
        }
    }

    pub fn end(&mut self, cues: &mut Vec<ActionCue>) {
        self.action.on_end(cues);
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    pub fn next_input_window(&self) -> f32 {
        self.action.next_input_window()
    }

    pub fn next(&self, action: ActionType) -> Option<NodeId> {
        self.next[action.index()]
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn via(&self) -> Option<ActionType> {
        self.via
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub fn action(&self) -> &ComboAction {
        &self.action
    }
}

// ============================================================================
// Action Tree
// ============================================================================

/// Out-tree combo шагов.
///
/// Строится один раз через [`ActionTree::register_combo`], дальше структура
/// не меняется (во время игры меняются только таймеры узлов).
#[derive(Debug, Clone)]
pub struct ActionTree {
    nodes: Vec<ActionNode>,
    owner: Option<Entity>,
}

impl Default for ActionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![ActionNode::new(ComboAction::default())],
            owner: None,
        }
    }

    /// Повесить `action` как шаг, достижимый из root по `path`.
    ///
    /// Регистрация строго в порядке префиксов: все input'ы кроме последнего
    /// уже должны резолвиться в узел, последний слот должен быть свободен.
    pub fn register_combo(
        &mut self,
        action: impl Into<ComboAction>,
        path: &[ActionType],
    ) -> Result<NodeId, RegistrationError> {
        let Some((&last, prefix)) = path.split_last() else {
            return Err(RegistrationError::EmptyPath);
        };

        let mut parent = NodeId::ROOT;
        for (walked, &input) in prefix.iter().enumerate() {
            parent = self
                .node(parent)
                .next(input)
                .ok_or_else(|| RegistrationError::MissingPrefix {
                    path: format_path(&prefix[..=walked]),
                })?;
        }

        if let Some(existing) = self.node(parent).next(last) {
            return Err(RegistrationError::DuplicateCombo {
                path: format_path(path),
                existing: self.node(existing).action().label().to_string(),
            });
        }

        let id = NodeId(self.nodes.len());
        let mut node = ActionNode::new(action.into());
        node.prev = Some(parent);
        node.via = Some(last);
        node.owner = self.owner;
        self.nodes.push(node);
        self.nodes[parent.0].next[last.index()] = Some(id);

        Ok(id)
    }

    /// Узел по `path` от root (если зарегистрирован)
    pub fn resolve(&self, path: &[ActionType]) -> Option<NodeId> {
        path.iter()
            .try_fold(NodeId::ROOT, |id, &input| self.node(id).next(input))
    }

    /// Путь input'ов от root до `id`, восстановленный по `prev`.
    pub fn path_to(&self, id: NodeId) -> Vec<ActionType> {
        let mut path = Vec::new();
        let mut cursor = id;
        while !cursor.is_root() {
            let node = self.node(cursor);
            let (Some(prev), Some(via)) = (node.prev, node.via) else {
                break;
            };
            path.push(via);
            cursor = prev;
        }
        path.reverse();
        path
    }

    /// Записать owner entity дерева во все узлы.
    pub fn bind_owner(&mut self, owner: Entity) {
        self.owner = Some(owner);
        for node in &mut self.nodes {
            node.owner = Some(owner);
        }
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub fn node(&self, id: NodeId) -> &ActionNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut ActionNode {
        &mut self.nodes[id.0]
    }

    /// Зарегистрированные шаги без root
    pub fn combo_count(&self) -> usize {
        self.nodes.len() - 1
    }
}
