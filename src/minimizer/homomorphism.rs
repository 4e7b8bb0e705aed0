//! Homomorphism search between a query and the query with one atom removed
//!
//! Only variables of the removed atom that are not distinguished (head or
//! aggregate variables) may be substituted. Each free variable either stays
//! put or maps to a term of another atom over the same relation. The search
//! is depth-first and stops at the first substitution whose image equals the
//! reduced body.

use std::collections::{HashMap, HashSet};

use crate::query::{Atom, Query, RelationalAtom, Term, Variable};

/// Simultaneous variable-to-term substitution
pub type Substitution = HashMap<Variable, Term>;

/// True if both atom lists contain the same distinct atoms.
///
/// Multiplicity is ignored, so the relation is symmetric.
pub fn equal_under_set_semantics(left: &[RelationalAtom], right: &[RelationalAtom]) -> bool {
    let l: HashSet<&RelationalAtom> = left.iter().collect();
    let r: HashSet<&RelationalAtom> = right.iter().collect();
    l == r
}

/// Applies `mapping` to every term of every atom
pub fn substitute(atoms: &[RelationalAtom], mapping: &Substitution) -> Vec<RelationalAtom> {
    atoms
        .iter()
        .map(|atom| {
            atom.map_terms(|term| match term {
                Term::Variable(v) => mapping.get(v).cloned().unwrap_or_else(|| term.clone()),
                Term::Constant(_) => term.clone(),
            })
        })
        .collect()
}

/// Does `query` map homomorphically onto itself with body atom `index` removed?
///
/// Returns false if `index` is out of range or names a comparison atom.
pub fn has_homomorphism(query: &Query, index: usize) -> bool {
    let alpha = match query.body().get(index) {
        Some(Atom::Relational(atom)) => atom,
        _ => return false,
    };
    let reduced = query.without_atom(index);

    let source: Vec<RelationalAtom> = query.relational_atoms().cloned().collect();
    let target: Vec<RelationalAtom> = reduced.relational_atoms().cloned().collect();

    // exact duplicate of a remaining atom
    if target.contains(alpha) {
        return true;
    }

    let distinguished = query.head().distinguished();
    let free: Vec<&Variable> = alpha
        .variables()
        .into_iter()
        .filter(|v| !distinguished.contains(v))
        .collect();

    let images: Vec<Vec<Term>> = free
        .iter()
        .map(|v| candidate_images(v, alpha, &target))
        .collect();

    let search = Search {
        source: &source,
        target: &target,
        free: &free,
        images: &images,
    };
    search.run(0, &mut Substitution::new())
}

/// Distinct terms of the other atoms over `alpha`'s relation, excluding `var`
fn candidate_images(var: &Variable, alpha: &RelationalAtom, others: &[RelationalAtom]) -> Vec<Term> {
    let mut images: Vec<Term> = Vec::new();
    for atom in others.iter().filter(|a| a.name() == alpha.name()) {
        for term in atom.terms() {
            if term.as_variable() == Some(var) || images.contains(term) {
                continue;
            }
            images.push(term.clone());
        }
    }
    images
}

struct Search<'q> {
    source: &'q [RelationalAtom],
    target: &'q [RelationalAtom],
    free: &'q [&'q Variable],
    images: &'q [Vec<Term>],
}

impl Search<'_> {
    /// Checks the current substitution, then branches on `free[depth]`
    fn run(&self, depth: usize, mapping: &mut Substitution) -> bool {
        if equal_under_set_semantics(&substitute(self.source, mapping), self.target) {
            return true;
        }
        if depth == self.free.len() {
            return false;
        }

        // leave the variable unmapped
        if self.run(depth + 1, mapping) {
            return true;
        }

        let var = self.free[depth];
        for image in &self.images[depth] {
            mapping.insert(var.clone(), image.clone());
            let found = self.run(depth + 1, mapping);
            mapping.remove(var);
            if found {
                return true;
            }
        }
        false
    }
}
