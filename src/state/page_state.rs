// ============================================================================
// PAGE STATE - Acumulado de páginas de un listado
// ============================================================================

use std::collections::HashSet;

use crate::models::Entity;

/// Items cargados hasta ahora y cursor de la siguiente página
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T> {
    /// Orden de llegada. Los duplicados entre páginas se mantienen salvo dedup.
    pub items: Vec<T>,
    /// Siguiente página a pedir, empieza en 1
    pub current_page: u32,
    pub has_more: bool,
    pub is_fetching: bool,
    pub error: Option<String>,
    /// Sube en cada reset; las respuestas de una época anterior se descartan
    pub epoch: u64,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            has_more: true,
            is_fetching: false,
            error: None,
            epoch: 0,
        }
    }
}

impl<T> PageState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vuelve a la primera página. El fetch en vuelo (si hay) queda obsoleto.
    pub fn reset(&mut self) {
        self.items.clear();
        self.current_page = 1;
        self.has_more = true;
        self.is_fetching = false;
        self.error = None;
        self.epoch += 1;
    }

    pub fn can_fetch(&self) -> bool {
        !self.is_fetching && self.has_more
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Entity> PageState<T> {
    /// Añade un lote al final; devuelve cuántos items se añadieron
    pub fn append(&mut self, batch: Vec<T>, dedup: bool) -> usize {
        if !dedup {
            let added = batch.len();
            self.items.extend(batch);
            return added;
        }

        let mut known: HashSet<String> = self
            .items
            .iter()
            .map(|item| item.entity_id().to_string())
            .collect();

        let before = self.items.len();
        for item in batch {
            if known.insert(item.entity_id().to_string()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }
}
