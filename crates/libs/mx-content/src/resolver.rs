//! Stable-over-unstable resolution of extension fields.
//!
//! Reads prefer the stable slot, falling back to the unstable one. Writes only
//! touch the unstable slot, which every peer understands; the stable slot is
//! written solely by [`promote`]. Precedence is protocol revision, not write
//! order: a stable value shadows any later [`set`].

use crate::descriptor::{ExtensionValue, FieldPair, KnownField};
use crate::slots::SlotStore;
use serde_json::Value as JsonValue;

/// Effective value of `pair`: stable if present, else unstable, else `None`.
pub fn get<S, V>(store: &S, pair: &FieldPair<V>) -> Option<V>
where
    S: SlotStore + ?Sized,
    V: ExtensionValue,
{
    stable(store, pair).or_else(|| unstable(store, pair))
}

/// Writes `value` into the unstable slot. The stable slot is left as is.
pub fn set<S, V>(store: &mut S, pair: &FieldPair<V>, value: V)
where
    S: SlotStore + ?Sized,
    V: ExtensionValue,
{
    store.slots_mut().put(pair.unstable_key(), value.to_slot());
}

/// Removes the unstable slot. The stable slot is left as is.
pub fn clear<S>(store: &mut S, field: &dyn KnownField)
where
    S: SlotStore + ?Sized,
{
    store.slots_mut().remove(field.unstable_key());
}

/// Copies the effective value into the stable slot.
///
/// Does nothing when the field has no effective value. Calling it again
/// leaves the stable slot unchanged.
pub fn promote<S>(store: &mut S, field: &dyn KnownField)
where
    S: SlotStore + ?Sized,
{
    let Some(value) = effective_raw(store, field).cloned() else {
        return;
    };
    log::debug!(
        "promoting '{}' from '{}' to '{}'",
        field.name(),
        field.unstable_key(),
        field.stable_key()
    );
    store.slots_mut().put(field.stable_key(), value);
}

/// Promotes every field in `fields`.
pub fn promote_all<S>(store: &mut S, fields: &[&dyn KnownField])
where
    S: SlotStore + ?Sized,
{
    for field in fields {
        promote(store, *field);
    }
}

pub fn stable<S, V>(store: &S, pair: &FieldPair<V>) -> Option<V>
where
    S: SlotStore + ?Sized,
    V: ExtensionValue,
{
    decode_slot(store.slots().raw(pair.stable_key()))
}

pub fn unstable<S, V>(store: &S, pair: &FieldPair<V>) -> Option<V>
where
    S: SlotStore + ?Sized,
    V: ExtensionValue,
{
    decode_slot(store.slots().raw(pair.unstable_key()))
}

fn effective_raw<'a, S>(store: &'a S, field: &dyn KnownField) -> Option<&'a JsonValue>
where
    S: SlotStore + ?Sized,
{
    let slots = store.slots();
    slots.raw(field.stable_key()).or_else(|| slots.raw(field.unstable_key()))
}

fn decode_slot<V: ExtensionValue>(raw: Option<&JsonValue>) -> Option<V> {
    raw.and_then(|raw| V::from_slot(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::{clear, get, promote, set, stable, unstable};
    use crate::descriptor::FieldPair;
    use crate::slots::{ExtensionSlots, SlotStore};
    use serde_json::json;

    const NOTE: FieldPair<String> = FieldPair::new("note", "m.note", "org.example.msc0000.note");

    #[test]
    fn empty_store_resolves_to_none() {
        let slots = ExtensionSlots::new();
        assert_eq!(get(&slots, &NOTE), None);
        assert_eq!(stable(&slots, &NOTE), None);
        assert_eq!(unstable(&slots, &NOTE), None);
    }

    #[test]
    fn stable_shadows_later_set() {
        let mut slots = ExtensionSlots::new();
        slots.slots_mut().put(NOTE.stable_key(), json!("stable"));
        set(&mut slots, &NOTE, "newer".to_string());

        assert_eq!(get(&slots, &NOTE).as_deref(), Some("stable"));
        assert_eq!(unstable(&slots, &NOTE).as_deref(), Some("newer"));
    }

    #[test]
    fn clear_keeps_stable_slot() {
        let mut slots = ExtensionSlots::new();
        slots.put(NOTE.stable_key(), json!("stable"));
        set(&mut slots, &NOTE, "unstable".to_string());

        clear(&mut slots, &NOTE);

        assert_eq!(unstable(&slots, &NOTE), None);
        assert_eq!(get(&slots, &NOTE).as_deref(), Some("stable"));
    }

    #[test]
    fn promote_without_value_is_noop() {
        let mut slots = ExtensionSlots::new();
        promote(&mut slots, &NOTE);
        assert!(slots.is_empty());
    }

    #[test]
    fn promote_copies_effective_value() {
        let mut slots = ExtensionSlots::new();
        set(&mut slots, &NOTE, "hello".to_string());
        promote(&mut slots, &NOTE);

        assert_eq!(stable(&slots, &NOTE).as_deref(), Some("hello"));
        assert_eq!(unstable(&slots, &NOTE).as_deref(), Some("hello"));
    }
}
