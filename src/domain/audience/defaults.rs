//! Built-in events.

use super::event::EventCandidate;

/// Fallback pool, in fixed order. Padding always draws from here.
const DEFAULT_POOL: [(&str, &str); 3] = [
    (
        "Poupoune the dog barks at the door",
        "The dog gets insistent and Jeanne has to go calm it down",
    ),
    (
        "The doorbell rings",
        "Someone is at the door (the postman or a delivery driver)",
    ),
    (
        "Jeanne has a coughing fit",
        "She has to excuse herself and get a glass of water",
    ),
];

/// Wider catalog shown to the moderator as examples of fitting events.
pub const INSPIRATION_EVENTS: &[(&str, &str)] = &[
    ("Poupoune the dog barks frantically", "The dog wants to go out or reacts to someone outside"),
    ("The doorbell rings", "The postman, a delivery driver or a neighbour is at the door"),
    ("Jeanne has a coughing fit", "She has to excuse herself and get a glass of water"),
    ("The mobile phone rings", "Another call comes in, probably her family"),
    ("The pan on the stove boils over", "Jeanne has to rush and turn off the stove"),
    ("Jeanne's favourite show starts", "Les Feux de l'Amour is on and she is distracted"),
    ("Jeanne has to take her medication", "It is time for her daily pills"),
    ("The cat knocks over a vase", "A loud crash and Jeanne has to clean up"),
    ("The neighbour knocks on the window", "She wants to borrow something"),
    ("Jeanne cannot find her glasses", "She can no longer read what the scammer asks for"),
];

/// The three default events, in pool order.
pub fn default_pool() -> [EventCandidate; 3] {
    DEFAULT_POOL.map(|(label, description)| EventCandidate::new(label, description))
}
