/// Payload persistido en el backend con identificador estable (`_id`).
///
/// El id identifica filas de los listados y es el objetivo de las mutaciones.
pub trait Entity {
    fn entity_id(&self) -> &str;
}
