//! Ordered Rule Tables
//!
//! Tiny interpreter shared by the correction cascade, the advisory passes and
//! label selection. Rule chains are plain data so their priority order is
//! visible in one place and each rule can be exercised on its own.
//!
//! - A `Rule` pairs a guard with an effect.
//! - A `RuleGroup` is evaluated top-down, first matching rule wins.
//! - A slice of groups is evaluated in order, every group gets a turn.

/// Guard + effect
pub struct Rule<C, E> {
    pub name: &'static str,
    pub when: fn(&C) -> bool,
    pub then: E,
}

impl<C, E> Rule<C, E> {
    pub fn applies(&self, ctx: &C) -> bool {
        (self.when)(ctx)
    }
}

/// Mutually exclusive rules, highest priority first
pub struct RuleGroup<C: 'static, E: 'static> {
    pub name: &'static str,
    pub rules: &'static [Rule<C, E>],
}

impl<C: 'static, E: 'static> RuleGroup<C, E> {
    pub fn first_match(&self, ctx: &C) -> Option<&'static Rule<C, E>> {
        first_match(self.rules, ctx)
    }
}

/// First rule whose guard holds
pub fn first_match<'r, C, E>(rules: &'r [Rule<C, E>], ctx: &C) -> Option<&'r Rule<C, E>> {
    rules.iter().find(|rule| rule.applies(ctx))
}

/// One winner per group, groups in order
pub fn fired<'a, C: 'static, E: 'static>(
    groups: &'a [RuleGroup<C, E>],
    ctx: &'a C,
) -> impl Iterator<Item = (&'a RuleGroup<C, E>, &'static Rule<C, E>)> + 'a {
    groups
        .iter()
        .filter_map(move |group| group.first_match(ctx).map(|rule| (group, rule)))
}
