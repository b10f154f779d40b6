//! Event-driven membership maintenance for the built-in smart playlists.

use std::rc::Rc;

use crate::protocol::LibraryEvent;
use crate::song::Rating;

use super::Playlist;

/// Fixed membership capacity shared by the built-in smart playlists.
pub const SMART_PLAYLIST_CAPACITY: usize = 5;

/// Keeps a most-liked playlist synchronized with library events.
///
/// On every rating event: add the rated song, trim the lowest-rated member
/// when over capacity, purge unrated members when the new rating is unrated,
/// then refill up to capacity from the whole library. On removal events the
/// base membership drop already happened; refill when below capacity and the
/// library still holds songs this playlist does not.
pub(super) fn sync_most_liked(playlist: &mut Playlist, event: &LibraryEvent) {
    match event {
        LibraryEvent::SongRated {
            song, new_rating, ..
        } => {
            playlist.add_automatic(Rc::clone(song));
            if playlist.len() > SMART_PLAYLIST_CAPACITY {
                remove_lowest_rated(playlist);
            }
            if *new_rating == Rating::Unrated {
                remove_unrated(playlist);
            }
            refill(playlist);
        }
        LibraryEvent::SongRemoved { .. } => {
            if playlist.len() < SMART_PLAYLIST_CAPACITY
                && playlist.library().len() > playlist.len()
            {
                refill(playlist);
            }
        }
        LibraryEvent::SongAdded { .. } => {}
    }
}

/// Keeps a most-recently-added playlist synchronized with library events.
///
/// Additions slide the window: append, then drop the oldest member when over
/// capacity. After a removal the window regains at most one slot, backfilled
/// by scanning the library from its newest entry backward.
pub(super) fn sync_most_recently_added(playlist: &mut Playlist, event: &LibraryEvent) {
    match event {
        LibraryEvent::SongAdded { song } => {
            playlist.add_automatic(Rc::clone(song));
            if playlist.len() > SMART_PLAYLIST_CAPACITY {
                playlist.remove_automatic(0);
            }
        }
        LibraryEvent::SongRemoved { .. } => {
            if playlist.len() < SMART_PLAYLIST_CAPACITY
                && playlist.library().len() > playlist.len()
            {
                backfill_one(playlist);
            }
        }
        LibraryEvent::SongRated { .. } => {}
    }
}

/// Drops the member with the lowest rating; ties resolve to the
/// earliest-inserted member.
fn remove_lowest_rated(playlist: &mut Playlist) {
    let mut lowest: Option<(usize, Rating)> = None;
    for index in 0..playlist.len() {
        let rating = playlist.get(index).rating();
        let is_lower = lowest.map_or(true, |(_, lowest_rating)| rating < lowest_rating);
        if is_lower {
            lowest = Some((index, rating));
        }
    }
    if let Some((index, _)) = lowest {
        playlist.remove_automatic(index);
    }
}

/// Drops every unrated member. Unrated members can only sit at the tail
/// (refill never admits them), so this truncates from the first one onward.
fn remove_unrated(playlist: &mut Playlist) {
    while let Some(index) =
        (0..playlist.len()).find(|&index| playlist.get(index).rating() == Rating::Unrated)
    {
        playlist.remove_automatic(index);
    }
}

/// Tops the playlist back up to capacity from the whole library, best-rated
/// first (stable over library order), never admitting unrated songs and
/// never growing past capacity.
fn refill(playlist: &mut Playlist) {
    let mut candidates = playlist.library().snapshot();
    candidates.sort_by(|left, right| right.rating().cmp(&left.rating()));
    for candidate in candidates {
        if playlist.len() >= SMART_PLAYLIST_CAPACITY {
            break;
        }
        if candidate.rating() == Rating::Unrated {
            continue;
        }
        playlist.add_automatic(candidate);
    }
}

/// Adds the newest library song not already present; exactly one slot is
/// refilled because exactly one song was removed.
fn backfill_one(playlist: &mut Playlist) {
    let library = playlist.library().clone();
    let original_len = playlist.len();
    for index in (0..library.len()).rev() {
        if playlist.len() != original_len {
            break;
        }
        playlist.add_automatic(library.song_at(index));
    }
}
