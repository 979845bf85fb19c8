//! Collection and map validation.
//!
//! [`CollectionExt`] adds size checks and element traversal to validators of
//! sequences, sets and maps. Element checks run with the element position
//! appended to the innermost path node:
//!
//! - `[i]<collection element>` for [`on_each`](CollectionExt::on_each)
//! - `[key]<map key>` for [`on_each_key`](CollectionExt::on_each_key)
//! - `[key]<map value>` for [`on_each_value`](CollectionExt::on_each_value)

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::{Debug, Display};
use std::marker::PhantomData;

use indexmap::{IndexMap, IndexSet};

use crate::accumulator::Accumulator;
use crate::constraint::{ConstraintResult, Rule};
use crate::schema::combinators::And;
use crate::schema::traits::Validator;
use crate::validation::ValidationContext;
use crate::Outcome;

/// A container with a known number of items.
///
/// `KIND` selects the message family: `collection` for sequences and sets,
/// `map` for maps.
pub trait Collection {
    const KIND: &'static str;

    fn item_count(&self) -> usize;
}

macro_rules! impl_collection {
    ($kind:literal => $($ty:ident<$($p:ident),+>),* $(,)?) => {
        $(impl<$($p),+> Collection for $ty<$($p),+> {
            const KIND: &'static str = $kind;

            fn item_count(&self) -> usize {
                self.len()
            }
        })*
    };
}

impl_collection!("collection" => Vec<E>, VecDeque<E>, HashSet<E, S>, BTreeSet<E>, IndexSet<E, S>);
impl_collection!("map" => HashMap<K, V, S>, BTreeMap<K, V>, IndexMap<K, V, S>);

impl<E> Collection for [E] {
    const KIND: &'static str = "collection";

    fn item_count(&self) -> usize {
        self.len()
    }
}

impl<E, const N: usize> Collection for [E; N] {
    const KIND: &'static str = "collection";

    fn item_count(&self) -> usize {
        N
    }
}

/// A map whose entries can be visited in iteration order.
pub trait MapLike {
    type Key;
    type Value;

    fn entries(&self) -> Box<dyn Iterator<Item = (&Self::Key, &Self::Value)> + '_>;
}

impl<K, V, S> MapLike for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

impl<K, V> MapLike for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

impl<K, V, S> MapLike for IndexMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

/// Size checks and element traversal for collections and maps.
///
/// # Example
///
/// ```rust
/// use kova::{CollectionExt, ComparableExt, Schema, ValidationConfig, ValidatorExt};
///
/// let scores = Schema::list::<i32>().non_empty().on_each(Schema::int().min(0));
///
/// let result = scores.try_validate(&vec![3, -1, 5], &ValidationConfig::default()).unwrap();
/// let messages = result.into_result().unwrap_err();
/// assert_eq!(messages.first().path.full_name(), "[1]<collection element>");
/// ```
pub trait CollectionExt<C>: Validator<Input = C, Output = C> + Sized
where
    C: Clone + Debug + Send + Sync + 'static,
{
    /// Requires at least `min` items.
    fn min_size(self, min: usize) -> And<Self, Rule<C>>
    where
        C: Collection,
    {
        And::new(self, size_rule("min", min, move |n| n >= min))
    }

    /// Requires at most `max` items.
    fn max_size(self, max: usize) -> And<Self, Rule<C>>
    where
        C: Collection,
    {
        And::new(self, size_rule("max", max, move |n| n <= max))
    }

    /// Requires exactly `size` items.
    fn size(self, size: usize) -> And<Self, Rule<C>>
    where
        C: Collection,
    {
        And::new(self, size_rule("length", size, move |n| n == size))
    }

    /// Requires at least one item.
    fn non_empty(self) -> And<Self, Rule<C>>
    where
        C: Collection,
    {
        And::new(
            self,
            Rule::predicate(format!("kova.{}.notEmpty", C::KIND), Vec::new(), |c: &C| {
                c.item_count() > 0
            }),
        )
    }

    /// Runs `validator` on every element.
    fn on_each<W>(self, validator: W) -> And<Self, OnEach<C, W>>
    where
        W: Validator,
        for<'a> &'a C: IntoIterator<Item = &'a W::Input>,
    {
        And::new(self, OnEach::new(validator))
    }

    /// Checks every element with a custom rule.
    fn ensure_each<E, F>(self, id: impl Into<String>, check: F) -> And<Self, OnEach<C, Rule<E>>>
    where
        E: Clone + Debug,
        for<'a> &'a C: IntoIterator<Item = &'a E>,
        F: Fn(&E, &ValidationContext) -> ConstraintResult + Send + Sync + 'static,
    {
        self.on_each(Rule::new(id, check))
    }

    /// Runs `validator` on every key of a map.
    fn on_each_key<W>(self, validator: W) -> And<Self, OnEachKey<C, W>>
    where
        C: MapLike,
        C::Key: Display,
        W: Validator<Input = C::Key>,
    {
        And::new(self, OnEachKey::new(validator))
    }

    /// Runs `validator` on every value of a map.
    fn on_each_value<W>(self, validator: W) -> And<Self, OnEachValue<C, W>>
    where
        C: MapLike,
        C::Key: Display,
        W: Validator<Input = C::Value>,
    {
        And::new(self, OnEachValue::new(validator))
    }
}

impl<C, V> CollectionExt<C> for V
where
    V: Validator<Input = C, Output = C>,
    C: Clone + Debug + Send + Sync + 'static,
{
}

fn size_rule<C>(
    rule: &str,
    bound: usize,
    ok: impl Fn(usize) -> bool + Send + Sync + 'static,
) -> Rule<C>
where
    C: Collection,
{
    Rule::predicate(format!("kova.{}.{}", C::KIND, rule), vec![bound.into()], move |c: &C| {
        ok(c.item_count())
    })
}

/// Validates every element of a collection.
pub struct OnEach<C, V> {
    validator: V,
    _marker: PhantomData<fn() -> C>,
}

impl<C, V> OnEach<C, V> {
    pub fn new(validator: V) -> Self {
        Self {
            validator,
            _marker: PhantomData,
        }
    }
}

impl<C, V> Validator for OnEach<C, V>
where
    C: Clone,
    V: Validator,
    for<'a> &'a C: IntoIterator<Item = &'a V::Input>,
{
    type Input = C;
    type Output = C;

    fn execute(&self, input: &C, ctx: &ValidationContext) -> Outcome<C> {
        let mut acc = Accumulator::new(ctx);
        for (i, element) in input.into_iter().enumerate() {
            let element_ctx = ctx.append_path(&format!("[{}]<collection element>", i));
            acc.push(self.validator.execute(element, &element_ctx)?);
            if acc.should_stop() {
                break;
            }
        }
        Ok(acc.finish(input.clone()))
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.validator.collect_refs(refs);
    }
}

/// Validates every key of a map.
pub struct OnEachKey<M, V> {
    validator: V,
    _marker: PhantomData<fn() -> M>,
}

impl<M, V> OnEachKey<M, V> {
    pub fn new(validator: V) -> Self {
        Self {
            validator,
            _marker: PhantomData,
        }
    }
}

impl<M, V> Validator for OnEachKey<M, V>
where
    M: MapLike + Clone,
    M::Key: Display,
    V: Validator<Input = M::Key>,
{
    type Input = M;
    type Output = M;

    fn execute(&self, input: &M, ctx: &ValidationContext) -> Outcome<M> {
        let mut acc = Accumulator::new(ctx);
        for (key, _) in input.entries() {
            let key_ctx = ctx.append_path(&format!("[{}]<map key>", key));
            acc.push(self.validator.execute(key, &key_ctx)?);
            if acc.should_stop() {
                break;
            }
        }
        Ok(acc.finish(input.clone()))
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.validator.collect_refs(refs);
    }
}

/// Validates every value of a map.
pub struct OnEachValue<M, V> {
    validator: V,
    _marker: PhantomData<fn() -> M>,
}

impl<M, V> OnEachValue<M, V> {
    pub fn new(validator: V) -> Self {
        Self {
            validator,
            _marker: PhantomData,
        }
    }
}

impl<M, V> Validator for OnEachValue<M, V>
where
    M: MapLike + Clone,
    M::Key: Display,
    V: Validator<Input = M::Value>,
{
    type Input = M;
    type Output = M;

    fn execute(&self, input: &M, ctx: &ValidationContext) -> Outcome<M> {
        let mut acc = Accumulator::new(ctx);
        for (key, value) in input.entries() {
            let value_ctx = ctx.append_path(&format!("[{}]<map value>", key));
            acc.push(self.validator.execute(value, &value_ctx)?);
            if acc.should_stop() {
                break;
            }
        }
        Ok(acc.finish(input.clone()))
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.validator.collect_refs(refs);
    }
}
