/// Named non-owning references from one node to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    /// Declaration an identifier resolves to.
    Instance,
    /// Resolved type of an expression.
    Type,
    /// The ATTRIBUTES list written in front of a declaration.
    Attributes,
    /// Frames a `goto` leaves.
    GotoExit,
    /// Frames a `goto` enters.
    GotoEnter,
}

impl Link {
    pub const COUNT: usize = 5;

    pub const ALL: [Link; Link::COUNT] = [
        Link::Instance,
        Link::Type,
        Link::Attributes,
        Link::GotoExit,
        Link::GotoEnter,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Link::Instance => 0,
            Link::Type => 1,
            Link::Attributes => 2,
            Link::GotoExit => 3,
            Link::GotoEnter => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Link::Instance => "instance",
            Link::Type => "type",
            Link::Attributes => "attributes",
            Link::GotoExit => "goto exit",
            Link::GotoEnter => "goto enter",
        }
    }
}
