use svcrdf_model::{Graph, NamedNode, NamedNodeRef, SubjectRef, Term, TermRef, Triple, TripleRef};

/// The triples emitted for one or more documents.
///
/// A set: inserting a triple that is already present has no effect.
#[derive(Clone, Debug, Default)]
pub struct TripleSet {
    graph: Graph,
}

impl TripleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a triple. Returns `false` if it was already present.
    pub fn insert<'a>(&mut self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.insert(triple)
    }

    /// Returns a handle adding triples about `subject`.
    pub fn resource(&mut self, subject: NamedNode) -> Resource<'_> {
        Resource { set: self, subject }
    }

    /// Moves all the triples of `other` into this set.
    pub fn extend(&mut self, other: TripleSet) {
        for triple in other.graph.iter() {
            self.graph.insert(triple);
        }
    }

    pub fn contains<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.graph.contains(triple)
    }

    /// The objects of the triples with the given subject and predicate.
    pub fn objects<'a, 'b>(
        &'a self,
        subject: impl Into<SubjectRef<'b>>,
        predicate: impl Into<NamedNodeRef<'b>>,
    ) -> Vec<TermRef<'a>> {
        self.graph
            .objects_for_subject_predicate(subject, predicate)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.graph.iter()
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

impl From<Graph> for TripleSet {
    fn from(graph: Graph) -> Self {
        Self { graph }
    }
}

impl FromIterator<Triple> for TripleSet {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut set = Self::new();
        for triple in iter {
            set.insert(&triple);
        }
        set
    }
}

/// A resource of a [`TripleSet`], to which attributes can be added.
pub struct Resource<'a> {
    set: &'a mut TripleSet,
    subject: NamedNode,
}

impl Resource<'_> {
    pub fn identifier(&self) -> NamedNodeRef<'_> {
        self.subject.as_ref()
    }

    /// Adds the triple `(identifier, predicate, object)`.
    pub fn add(&mut self, predicate: NamedNodeRef<'_>, object: impl Into<Term>) -> &mut Self {
        let object = object.into();
        self.set
            .insert(TripleRef::new(&self.subject, predicate, &object));
        self
    }
}
