//! Message grouping, chat list ordering and day pagination.

use crate::archive::{ConversationSummary, GlobalIndex, Message};
use crate::format::Clock;

/// A run of consecutive messages under one date separator
#[derive(Debug)]
pub struct MessageGroup<'a> {
    pub label: String,
    /// `(position in the conversation, message)`
    pub messages: Vec<(usize, &'a Message)>,
}

/// Group consecutive messages that share a separator label
pub fn group_by_date<'a>(messages: &'a [Message], clock: &Clock) -> Vec<MessageGroup<'a>> {
    let mut groups: Vec<MessageGroup<'a>> = Vec::new();
    for (index, message) in messages.iter().enumerate() {
        let label = clock.date_separator(message.timestamp);
        match groups.last_mut() {
            Some(group) if group.label == label => group.messages.push((index, message)),
            _ => groups.push(MessageGroup {
                label,
                messages: vec![(index, message)],
            }),
        }
    }
    groups
}

/// A conversation as listed in the chat list
#[derive(Debug, Clone)]
pub struct ChatEntry<'a> {
    pub id: &'a str,
    pub summary: &'a ConversationSummary,
    pub name: String,
}

/// Build chat list entries for a day, most recent first
pub fn chat_entries<'a>(
    conversations: impl IntoIterator<Item = (&'a String, &'a ConversationSummary)>,
    global: &GlobalIndex,
) -> Vec<ChatEntry<'a>> {
    let mut entries: Vec<ChatEntry<'a>> = conversations
        .into_iter()
        .map(|(id, summary)| ChatEntry {
            id: id.as_str(),
            summary,
            name: summary.display_name(id, global),
        })
        .collect();
    sort_chats(&mut entries);
    entries
}

/// Most recent first; ties keep their original order
pub fn sort_chats(entries: &mut [ChatEntry<'_>]) {
    entries.sort_by(|a, b| {
        b.summary
            .latest_timestamp
            .cmp(&a.summary.latest_timestamp)
    });
}

/// Case-insensitive match on the display name
pub fn filter_chats<'a>(entries: Vec<ChatEntry<'a>>, query: &str) -> Vec<ChatEntry<'a>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries;
    }
    entries
        .into_iter()
        .filter(|entry| entry.name.to_lowercase().contains(&query))
        .collect()
}

/// Previous/next navigation over the sorted list of archive days
#[derive(Debug, Clone, Default)]
pub struct DayPager {
    days: Vec<String>,
}

impl DayPager {
    pub fn new(mut days: Vec<String>) -> Self {
        days.sort();
        days.dedup();
        Self { days }
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn contains(&self, day: &str) -> bool {
        self.position(day).is_some()
    }

    pub fn latest(&self) -> Option<&str> {
        self.days.last().map(String::as_str)
    }

    fn position(&self, day: &str) -> Option<usize> {
        self.days.binary_search_by(|d| d.as_str().cmp(day)).ok()
    }

    /// `(previous, next)` days around `day`; an unknown day has neither
    pub fn neighbors(&self, day: &str) -> (Option<&str>, Option<&str>) {
        let Some(index) = self.position(day) else {
            return (None, None);
        };
        let prev = index
            .checked_sub(1)
            .and_then(|i| self.days.get(i))
            .map(String::as_str);
        let next = self.days.get(index + 1).map(String::as_str);
        (prev, next)
    }
}
