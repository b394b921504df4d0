use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::models::branch::Branch;
use crate::domain::models::directory::{Group, Room, Teacher};
use crate::domain::ports::DirectoryProvider;
use crate::error::AppError;

#[derive(Default)]
struct DirectoryInner {
    branches: HashMap<String, Branch>,
    rooms: HashMap<String, Room>,
    teachers: HashMap<String, Teacher>,
    groups: HashMap<String, Group>,
}

#[derive(Default)]
pub struct MemoryDirectory {
    inner: Mutex<DirectoryInner>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_branch(&self, branch: Branch) {
        let mut inner = self.inner.lock().expect("directory poisoned");
        inner.branches.insert(branch.id.clone(), branch);
    }

    pub fn add_room(&self, room: Room) {
        let mut inner = self.inner.lock().expect("directory poisoned");
        inner.rooms.insert(room.id.clone(), room);
    }

    pub fn add_teacher(&self, teacher: Teacher) {
        let mut inner = self.inner.lock().expect("directory poisoned");
        inner.teachers.insert(teacher.id.clone(), teacher);
    }

    pub fn add_group(&self, group: Group) {
        let mut inner = self.inner.lock().expect("directory poisoned");
        inner.groups.insert(group.id.clone(), group);
    }
}

#[async_trait]
impl DirectoryProvider for MemoryDirectory {
    async fn find_branch(&self, branch_id: &str) -> Result<Option<Branch>, AppError> {
        let inner = self.inner.lock().map_err(|_| AppError::Internal)?;
        Ok(inner.branches.get(branch_id).cloned())
    }

    async fn find_room(&self, room_id: &str) -> Result<Option<Room>, AppError> {
        let inner = self.inner.lock().map_err(|_| AppError::Internal)?;
        Ok(inner.rooms.get(room_id).cloned())
    }

    async fn find_teacher(&self, teacher_id: &str) -> Result<Option<Teacher>, AppError> {
        let inner = self.inner.lock().map_err(|_| AppError::Internal)?;
        Ok(inner.teachers.get(teacher_id).cloned())
    }

    async fn find_group(&self, group_id: &str) -> Result<Option<Group>, AppError> {
        let inner = self.inner.lock().map_err(|_| AppError::Internal)?;
        Ok(inner.groups.get(group_id).cloned())
    }
}
